//! # Movement Controller
//!
//! The per-frame update for the player and the trains. One call to
//! [`MovementController::step`] consumes the frame's input and delta time and
//! advances the whole [`SimulationState`]:
//!
//! 1. Edge-triggered actions fire (dance toggle, camera toggle, hail, interact).
//! 2. Every train advances along its track and checks whether a pending hail
//!    has brought it to the player.
//! 3. A riding player is carried by the train; otherwise jetpack, gravity,
//!    turning and walking are applied.
//!
//! Walking uses a discrete try-move: the footprint box is placed at the
//! candidate position and the move is dropped entirely if it overlaps any
//! obstacle. There is no sliding along walls.

use cgmath::{InnerSpace, Vector3};
use log::{debug, info, trace, warn};

use super::player::Locomotion;
use super::state::SimulationState;
use super::vehicle::VehicleId;
use crate::config::{ExplorerConfig, PlayerConfig, VehicleConfig};
use crate::gfx::collision::{overlaps_any, Aabb, Obstacle};
use crate::input::{Action, InputState};

/// What an interact action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractOutcome {
    Boarded(VehicleId),
    Dismounted(VehicleId),
    NothingInReach,
}

/// What a call-vehicle action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HailOutcome {
    /// The closest train was parked and has been sent on its way.
    Unparked(VehicleId),
    /// The closest train will stop when it reaches the player.
    Hailed { vehicle: VehicleId, relocated: bool },
    NoneInRange,
    /// Hailing is ignored while riding.
    WhileMounted,
}

pub struct MovementController {
    player: PlayerConfig,
    vehicles: VehicleConfig,
}

impl MovementController {
    pub fn new(config: &ExplorerConfig) -> Self {
        Self {
            player: config.player.clone(),
            vehicles: config.vehicles.clone(),
        }
    }

    /// Advance the simulation by one frame
    ///
    /// # Arguments
    /// * `state` - Player, trains and obstacles to update in place
    /// * `input` - Held actions and this frame's pulses
    /// * `delta_time` - Frame time in seconds; a non-positive or non-finite
    ///   delta still applies pulsed actions but moves nothing
    pub fn step(&self, state: &mut SimulationState, input: &InputState, delta_time: f32) {
        self.apply_actions(state, input);

        if delta_time == 0.0 {
            return;
        }
        if !(delta_time > 0.0) || !delta_time.is_finite() {
            warn!("Skipping motion for frame delta {delta_time}");
            return;
        }
        state.elapsed += delta_time;

        let player_position = state.player.position;
        for (i, vehicle) in state.vehicles.iter_mut().enumerate() {
            vehicle.advance(delta_time, self.vehicles.reset_limit);
            if vehicle.try_arrive(player_position, self.vehicles.arrival_threshold) {
                info!(
                    "Train {i} stopped for boarding at ({:.1}, {:.1})",
                    vehicle.position.x, vehicle.position.z
                );
            }
        }

        if state.player.is_mounted() {
            self.ride(state);
        } else {
            self.move_on_foot(state, input, delta_time);
        }

        trace!(
            "t={:.3} player=({:.2}, {:.2}, {:.2}) vy={:.2} {:?}",
            state.elapsed,
            state.player.position.x,
            state.player.position.y,
            state.player.position.z,
            state.player.vertical_velocity,
            state.player.locomotion
        );
    }

    /// Board the nearest train in reach, or leave the current one
    pub fn interact(&self, state: &mut SimulationState) -> InteractOutcome {
        if let Some(id) = state.player.mounted.take() {
            let step_off = state
                .player
                .to_world(Vector3::new(self.player.dismount_offset, 0.0, 0.0));
            let player = &mut state.player;
            player.position += step_off;
            player.position.y = 0.0;
            player.vertical_velocity = 0.0;
            player.airborne = false;

            if let Some(vehicle) = state.vehicle_mut(id) {
                vehicle.stopped = false;
            }
            info!(
                "Left train {} at ({:.1}, {:.1})",
                id.0, state.player.position.x, state.player.position.z
            );
            return InteractOutcome::Dismounted(id);
        }

        let origin = state.player.position;
        let nearest = state
            .vehicles
            .iter()
            .enumerate()
            .map(|(i, v)| (i, (v.position - origin).magnitude()))
            .filter(|(_, distance)| *distance < self.vehicles.board_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let Some((index, distance)) = nearest else {
            debug!("No train within {} to board", self.vehicles.board_radius);
            return InteractOutcome::NothingInReach;
        };

        let id = VehicleId(index);
        if let Some(vehicle) = state.vehicle_mut(id) {
            vehicle.stopped = false;
            vehicle.hailed = false;
        }
        state.dancing = false;

        let player = &mut state.player;
        player.mounted = Some(id);
        player.locomotion = Locomotion::Idle;
        player.vertical_velocity = 0.0;
        player.airborne = false;

        info!("Boarded train {index} ({distance:.1} away)");
        InteractOutcome::Boarded(id)
    }

    /// Call the closest train on the line the player is standing by
    ///
    /// Trains whose track passes within the lateral threshold of the player are
    /// candidates; the one nearest along its track is chosen.
    pub fn hail(&self, state: &mut SimulationState) -> HailOutcome {
        if state.player.is_mounted() {
            debug!("Ignoring hail while riding");
            return HailOutcome::WhileMounted;
        }

        let p = state.player.position;
        let lateral = self.vehicles.hail_lateral_threshold;
        let chosen = state
            .vehicles
            .iter_mut()
            .enumerate()
            .filter(|(_, v)| v.cross_track_distance(p) < lateral)
            .min_by(|(_, a), (_, b)| {
                a.along_track_distance(p)
                    .total_cmp(&b.along_track_distance(p))
            });

        let Some((index, vehicle)) = chosen else {
            debug!("No track within {lateral} of the player");
            return HailOutcome::NoneInRange;
        };
        let id = VehicleId(index);

        if vehicle.stopped {
            vehicle.stopped = false;
            info!("Sent parked train {index} on its way");
            return HailOutcome::Unparked(id);
        }

        vehicle.hailed = true;
        let relocated = vehicle.along_track_distance(p) > self.vehicles.hail_far_distance;
        if relocated {
            let along =
                vehicle.axis.along(p) - vehicle.direction() * self.vehicles.hail_lead_distance;
            vehicle.set_along(along);
        }
        info!("Hailed train {index}{}", if relocated { " (brought up the line)" } else { "" });

        HailOutcome::Hailed {
            vehicle: id,
            relocated,
        }
    }

    /// Whether the footprint at `candidate` would overlap an obstacle
    pub fn is_blocked(&self, candidate: Vector3<f32>, obstacles: &[Obstacle]) -> bool {
        let probe = Aabb::from_center_size(candidate, self.player.footprint());
        overlaps_any(&probe, obstacles)
    }

    fn apply_actions(&self, state: &mut SimulationState, input: &InputState) {
        if input.was_pulsed(Action::ToggleDance) {
            state.dancing = !state.dancing;
            debug!("Dance mode {}", if state.dancing { "on" } else { "off" });
        }
        if input.was_pulsed(Action::ToggleCamera) {
            state.camera_mode = state.camera_mode.toggled();
            debug!("Camera mode {:?}", state.camera_mode);
        }
        if input.was_pulsed(Action::CallVehicle) {
            self.hail(state);
        }
        if input.was_pulsed(Action::Interact) {
            self.interact(state);
        }
    }

    fn ride(&self, state: &mut SimulationState) {
        let Some(id) = state.player.mounted else {
            return;
        };
        let Some(vehicle) = state.vehicles.get(id.0) else {
            warn!("Ridden train {} no longer exists, dropping the player", id.0);
            state.player.mounted = None;
            return;
        };

        let seat = vehicle.position + Vector3::new(0.0, self.player.ride_height, 0.0);
        let player = &mut state.player;
        player.position = seat;
        player.vertical_velocity = 0.0;
        player.airborne = false;
    }

    fn move_on_foot(&self, state: &mut SimulationState, input: &InputState, delta_time: f32) {
        let cfg = &self.player;
        let player = &mut state.player;

        // Vertical
        if input.is_held(Action::Jetpack) {
            player.vertical_velocity = (player.vertical_velocity + cfg.jetpack_accel * delta_time)
                .min(cfg.max_ascent_rate);
            player.airborne = true;
        } else if player.position.y > 0.0 {
            player.vertical_velocity += cfg.gravity * delta_time;
        }
        player.position.y += player.vertical_velocity * delta_time;
        if player.position.y < 0.0 {
            player.position.y = 0.0;
            player.vertical_velocity = 0.0;
            player.airborne = false;
        }

        // Turning
        let turn = cfg.turn_speed * delta_time;
        if input.is_held(Action::TurnLeft) {
            player.heading += turn;
        }
        if input.is_held(Action::TurnRight) {
            player.heading -= turn;
        }

        // Walking
        let moving = input.wants_to_move();
        if moving {
            let stride = player.forward() * (cfg.move_speed * delta_time);
            let mut candidate = player.position;
            if input.is_held(Action::MoveForward) {
                candidate += stride;
            }
            if input.is_held(Action::MoveBack) {
                candidate -= stride;
            }

            if self.is_blocked(candidate, &state.obstacles) {
                trace!("Move to ({:.2}, {:.2}) blocked", candidate.x, candidate.z);
            } else {
                player.position.x = candidate.x;
                player.position.z = candidate.z;
            }
        }

        player.locomotion = if player.height() > cfg.airborne_posture_height {
            Locomotion::Idle
        } else if moving {
            state.dancing = false;
            Locomotion::Walking
        } else if state.dancing {
            Locomotion::Dancing
        } else {
            Locomotion::Idle
        };
    }
}
