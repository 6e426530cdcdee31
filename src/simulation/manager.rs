//! Simulation manager for the explorer
//!
//! Manages the lifecycle of a simulation and turns raw frame deltas into
//! simulation steps: stalls are clamped, time is scaled, and an optional fixed
//! timestep splits a frame into equal sub-steps.

use super::state::SimulationState;
use super::traits::Simulation;
use crate::config::SimulationConfig;
use crate::input::InputState;

/// Drives one attached simulation
pub struct SimulationManager {
    simulation: Option<Box<dyn Simulation>>,
    is_paused: bool,
    time_scale: f32,
    accumulated_time: f32,
    fixed_timestep: Option<f32>, // For deterministic simulations
    max_frame_delta: f32,
}

impl SimulationManager {
    /// Create a new simulation manager
    pub fn new() -> Self {
        Self::from_config(&SimulationConfig::default())
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            simulation: None,
            is_paused: false,
            time_scale: 1.0,
            accumulated_time: 0.0,
            fixed_timestep: config.fixed_timestep.filter(|dt| *dt > 0.0),
            max_frame_delta: config.max_frame_delta,
        }
    }

    /// Attach a simulation, replacing any current one
    ///
    /// # Arguments
    /// * `simulation` - Boxed simulation implementing the Simulation trait
    pub fn attach_simulation(&mut self, mut simulation: Box<dyn Simulation>) {
        // Clean up previous simulation if any
        if let Some(mut old_sim) = self.simulation.take() {
            log::debug!("Replacing simulation '{}'", old_sim.name());
            old_sim.cleanup();
        }

        simulation.initialize();
        log::info!("Attached simulation '{}'", simulation.name());
        self.simulation = Some(simulation);
        self.is_paused = false;
        self.accumulated_time = 0.0;
    }

    /// Remove current simulation
    pub fn detach_simulation(&mut self) {
        if let Some(mut sim) = self.simulation.take() {
            sim.cleanup();
        }
    }

    /// Step the simulation for one rendered frame
    ///
    /// Pulsed actions in `input` reach only the first sub-step of the frame.
    /// A non-finite or negative delta is treated as zero.
    ///
    /// # Arguments
    /// * `delta_time` - Wall time since the last frame in seconds
    /// * `input` - Input state for this frame
    ///
    /// # Returns
    /// Number of simulation steps taken
    pub fn update(&mut self, delta_time: f32, input: &InputState) -> usize {
        if self.is_paused {
            return 0;
        }
        let Some(simulation) = &mut self.simulation else {
            return 0;
        };

        let frame_delta = if delta_time.is_finite() {
            delta_time.clamp(0.0, self.max_frame_delta)
        } else {
            log::warn!("Ignoring non-finite frame delta {delta_time}");
            0.0
        };
        if frame_delta < delta_time {
            log::debug!("Clamped frame delta {delta_time:.3}s to {frame_delta:.3}s");
        }
        let scaled_delta = frame_delta * self.time_scale;

        let Some(fixed_dt) = self.fixed_timestep else {
            // Variable timestep
            simulation.update(scaled_delta, input);
            return 1;
        };

        // Fixed timestep simulation for deterministic results
        self.accumulated_time += scaled_delta;
        let mut step_input = *input;
        let mut steps = 0;
        while self.accumulated_time >= fixed_dt {
            simulation.update(fixed_dt, &step_input);
            step_input.end_frame();
            self.accumulated_time -= fixed_dt;
            steps += 1;
        }

        if steps == 0 {
            // Still deliver this frame's pulses
            simulation.update(0.0, &step_input);
        }
        steps
    }

    /// Reset the attached simulation and the step accumulator
    pub fn reset(&mut self) {
        self.accumulated_time = 0.0;
        if let Some(simulation) = &mut self.simulation {
            simulation.reset();
        }
    }

    /// Get current simulation name
    ///
    /// # Returns
    /// Optional reference to the simulation name
    pub fn current_simulation_name(&self) -> Option<&str> {
        self.simulation.as_ref().map(|s| s.name())
    }

    /// Player and vehicle state of the attached simulation
    pub fn state(&self) -> Option<&SimulationState> {
        self.simulation.as_ref().and_then(|s| s.state())
    }

    /// Check if simulation is running
    ///
    /// # Returns
    /// `true` if simulation exists and is not paused
    pub fn is_running(&self) -> bool {
        !self.is_paused && self.simulation.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Set pause state
    ///
    /// # Arguments
    /// * `paused` - Whether to pause the simulation
    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
        if let Some(simulation) = &mut self.simulation {
            simulation.set_running(!paused);
        }
    }

    /// Enable fixed timestep mode
    ///
    /// # Arguments
    /// * `timestep` - Fixed timestep in seconds, or None for variable timestep
    pub fn set_fixed_timestep(&mut self, timestep: Option<f32>) {
        self.fixed_timestep = timestep.filter(|dt| *dt > 0.0);
        self.accumulated_time = 0.0; // Reset accumulator
    }

    pub fn fixed_timestep(&self) -> Option<f32> {
        self.fixed_timestep
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set time scale
    ///
    /// # Arguments
    /// * `scale` - Time scale multiplier (1.0 = normal speed)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0); // Prevent negative time
    }

    pub fn has_simulation(&self) -> bool {
        self.simulation.is_some()
    }
}

impl Default for SimulationManager {
    fn default() -> Self {
        Self::new()
    }
}
