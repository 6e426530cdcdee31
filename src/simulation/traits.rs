//! Core simulation traits for the explorer
//!
//! Defines the interface a simulation implements to be driven by the
//! [`SimulationManager`](super::manager::SimulationManager).

use super::state::SimulationState;
use crate::input::InputState;

/// Core trait for frame-stepped simulations
///
/// The manager calls these lifecycle methods to run the simulation. The
/// colony explorer itself is one implementation; tests supply others.
pub trait Simulation {
    /// Initialize the simulation
    ///
    /// Called once when the simulation is attached to a manager.
    fn initialize(&mut self);

    /// Advance the simulation by one step
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since the last step in seconds
    /// * `input` - Held actions and the pulses to apply on this step
    fn update(&mut self, delta_time: f32, input: &InputState);

    /// Get simulation name for logging
    fn name(&self) -> &str;

    /// Whether simulation is currently running
    fn is_running(&self) -> bool;

    /// Start/pause simulation
    fn set_running(&mut self, running: bool);

    /// Reset simulation to initial state
    fn reset(&mut self);

    /// The player and vehicle state, for simulations that have one
    fn state(&self) -> Option<&SimulationState> {
        None
    }

    /// Optional: Custom cleanup when simulation is removed
    fn cleanup(&mut self) {
        // Default: no cleanup needed
    }
}
