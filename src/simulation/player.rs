//! Player entity and state.

use cgmath::{Quaternion, Rad, Rotation3, Vector3};

use super::vehicle::VehicleId;

/// Which locomotion clip the player should be showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locomotion {
    #[default]
    Idle,
    Walking,
    Dancing,
}

/// A player in the colony.
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Feet position in world space.
    pub position: Vector3<f32>,

    /// Heading about +Y in radians; zero faces +Z.
    pub heading: f32,

    /// Vertical velocity (units/second).
    pub vertical_velocity: f32,

    /// Lifted off by the jetpack and not yet landed.
    pub airborne: bool,

    pub locomotion: Locomotion,

    /// Vehicle currently ridden. The player never owns it.
    pub mounted: Option<VehicleId>,
}

impl PlayerState {
    /// Create a new player standing at the given spawn position.
    pub fn new(spawn: Vector3<f32>) -> Self {
        Self {
            position: spawn,
            heading: 0.0,
            vertical_velocity: 0.0,
            airborne: false,
            locomotion: Locomotion::Idle,
            mounted: None,
        }
    }

    /// Rotation of the player's local frame
    #[inline]
    pub fn rotation(&self) -> Quaternion<f32> {
        Quaternion::from_angle_y(Rad(self.heading))
    }

    /// Horizontal facing direction
    #[inline]
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation() * Vector3::unit_z()
    }

    /// Rotate a vector from the player's local frame into world space
    #[inline]
    pub fn to_world(&self, local: Vector3<f32>) -> Vector3<f32> {
        self.rotation() * local
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Height of the feet above the ground plane
    #[inline]
    pub fn height(&self) -> f32 {
        self.position.y
    }
}
