//! The colony explorer as a [`Simulation`].

use super::controller::MovementController;
use super::state::SimulationState;
use super::traits::Simulation;
use crate::config::ExplorerConfig;
use crate::input::InputState;
use crate::world::{World, WorldBuilder};

/// Player, trains and static obstacles stepped by the movement controller
pub struct ColonySimulation {
    config: ExplorerConfig,
    controller: MovementController,
    /// Pristine world kept for resets.
    world: World,
    state: SimulationState,
    running: bool,
}

impl ColonySimulation {
    /// Build the world described by `config` and place the player at spawn
    pub fn new(config: ExplorerConfig) -> Self {
        let world = WorldBuilder::new(&config).build();
        Self::with_world(config, world)
    }

    /// Run on a pre-built world
    pub fn with_world(config: ExplorerConfig, world: World) -> Self {
        let controller = MovementController::new(&config);
        let state = SimulationState::new(world.clone(), config.player.spawn());
        Self {
            config,
            controller,
            world,
            state,
            running: false,
        }
    }
}

impl Simulation for ColonySimulation {
    fn initialize(&mut self) {
        self.running = true;
        log::info!(
            "Colony ready: {} obstacles, {} trains, player at ({:.1}, {:.1}, {:.1})",
            self.state.obstacles.len(),
            self.state.vehicles.len(),
            self.state.player.position.x,
            self.state.player.position.y,
            self.state.player.position.z
        );
    }

    fn update(&mut self, delta_time: f32, input: &InputState) {
        if !self.running {
            return;
        }
        self.controller.step(&mut self.state, input, delta_time);
    }

    fn name(&self) -> &str {
        "Colony Explorer"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    fn reset(&mut self) {
        self.state = SimulationState::new(self.world.clone(), self.config.player.spawn());
        log::info!("Colony reset");
    }

    fn state(&self) -> Option<&SimulationState> {
        Some(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;
    use crate::simulation::manager::SimulationManager;

    fn small_config() -> ExplorerConfig {
        let mut config = ExplorerConfig::default();
        config.world.rock_count = 0;
        config
    }

    #[test]
    fn test_runs_under_manager() {
        let mut manager = SimulationManager::new();
        manager.attach_simulation(Box::new(ColonySimulation::new(small_config())));

        let mut input = InputState::new();
        input.press(Action::MoveForward);
        for _ in 0..30 {
            manager.update(1.0 / 60.0, &input);
        }

        let state = manager.state().unwrap();
        assert!(state.player.position.z > 20.0);
        assert!((state.elapsed - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_reset_restores_spawn_and_trains() {
        let mut sim = ColonySimulation::new(small_config());
        sim.initialize();
        let first_train = sim.state.vehicles[0].position;

        let mut input = InputState::new();
        input.press(Action::TurnLeft);
        input.press(Action::MoveForward);
        for _ in 0..20 {
            sim.update(0.05, &input);
        }
        assert_ne!(sim.state.vehicles[0].position, first_train);

        sim.reset();
        assert_eq!(sim.state.player.position, small_config().player.spawn());
        assert_eq!(sim.state.vehicles[0].position, first_train);
        assert_eq!(sim.state.elapsed, 0.0);
    }

    #[test]
    fn test_paused_simulation_holds_still() {
        let mut sim = ColonySimulation::new(small_config());
        sim.initialize();
        sim.set_running(false);
        sim.update(0.1, &InputState::new());
        assert_eq!(sim.state.elapsed, 0.0);
    }
}
