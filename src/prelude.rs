//! # Colony Explorer Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use colony_explorer::prelude::*;
//!
//! let config = ExplorerConfig::default();
//! let mut state = SimulationState::new(World::empty(), config.player.spawn());
//! let controller = MovementController::new(&config);
//!
//! let mut input = InputState::new();
//! input.press(Action::MoveForward);
//! controller.step(&mut state, &input, 0.1);
//!
//! assert_eq!(state.player.locomotion, Locomotion::Walking);
//! ```

pub use crate::app::ExplorerApp;
pub use crate::assets::{AssetSlot, LoadTracker};
pub use crate::config::{ConfigError, ExplorerConfig};
pub use crate::gfx::{
    anim::AnimationBlender,
    camera::{CameraMode, FollowCamera},
    collision::{Aabb, Obstacle},
};
pub use crate::input::{Action, InputState, KeyBindings};
pub use crate::performance::PerformanceMonitor;
pub use crate::simulation::{
    colony::ColonySimulation,
    controller::{HailOutcome, InteractOutcome, MovementController},
    manager::SimulationManager,
    player::{Locomotion, PlayerState},
    state::SimulationState,
    traits::Simulation,
    vehicle::{TravelAxis, Vehicle, VehicleId},
};
pub use crate::world::{World, WorldBuilder};
