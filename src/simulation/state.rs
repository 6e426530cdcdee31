//! Simulation state owned by the caller and stepped once per frame.

use cgmath::Vector3;

use super::player::PlayerState;
use super::vehicle::{Vehicle, VehicleId};
use crate::gfx::camera::CameraMode;
use crate::gfx::collision::Obstacle;
use crate::world::World;

/// Everything the movement controller reads and writes
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub player: PlayerState,
    pub vehicles: Vec<Vehicle>,
    /// Fixed at world build time.
    pub obstacles: Vec<Obstacle>,
    /// Dance toggle; cleared by walking or boarding.
    pub dancing: bool,
    pub camera_mode: CameraMode,
    /// Simulated seconds since the state was created.
    pub elapsed: f32,
}

impl SimulationState {
    pub fn new(world: World, spawn: Vector3<f32>) -> Self {
        Self {
            player: PlayerState::new(spawn),
            vehicles: world.vehicles,
            obstacles: world.obstacles,
            dancing: false,
            camera_mode: CameraMode::default(),
            elapsed: 0.0,
        }
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.0)
    }

    pub fn vehicle_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(id.0)
    }

    /// The vehicle the player is riding, if any
    pub fn mounted_vehicle(&self) -> Option<&Vehicle> {
        self.player.mounted.and_then(|id| self.vehicle(id))
    }
}
