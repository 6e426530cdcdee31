use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::assets::LoadTracker;
use crate::config::ExplorerConfig;
use crate::gfx::{
    anim::AnimationBlender,
    camera::{CameraUniform, FollowCamera},
};
use crate::input::{Action, InputState, KeyBindings};
use crate::performance::PerformanceMonitor;
use crate::simulation::{
    colony::ColonySimulation, manager::SimulationManager, state::SimulationState,
    traits::Simulation,
};

/// Ties input, simulation, camera and animation state together for one window
pub struct ExplorerApp {
    bindings: KeyBindings,
    input: InputState,
    manager: SimulationManager,
    camera: FollowCamera,
    blender: AnimationBlender,
    loading: LoadTracker,
    performance: PerformanceMonitor,
}

impl ExplorerApp {
    /// Build the colony and attach it to a fresh simulation manager
    pub fn new(config: ExplorerConfig) -> Self {
        let mut manager = SimulationManager::from_config(&config.simulation);
        let performance = PerformanceMonitor::with_window(config.simulation.stats_window);

        let simulation = ColonySimulation::new(config.clone());
        let mut camera = FollowCamera::new(config.camera.clone(), config.player.spawn());
        if let Some(state) = simulation.state() {
            camera.snap(&state.player, state.camera_mode);
        }
        manager.attach_simulation(Box::new(simulation));

        Self {
            bindings: KeyBindings::default(),
            input: InputState::new(),
            manager,
            camera,
            blender: AnimationBlender::default(),
            loading: LoadTracker::new(),
            performance,
        }
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Route a physical key change to the input state
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool, repeat: bool) -> Option<Action> {
        self.input.key_event(&self.bindings, key, pressed, repeat)
    }

    /// Handle a window event
    ///
    /// # Returns
    /// `false` when the app should exit
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => return false,
            WindowEvent::Focused(false) => self.input.clear(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                if matches!(key_code, KeyCode::Escape) {
                    return false;
                }
                self.handle_key(*key_code, *state == ElementState::Pressed, *repeat);
            }
            _ => (),
        }
        true
    }

    /// Run one frame: step the simulation, then ease the camera and blend clips
    ///
    /// Nothing is stepped until every registered asset has settled.
    pub fn frame(&mut self, delta_time: f32) {
        self.performance.record_frame(delta_time);

        if self.loading.is_finished() {
            self.manager.update(delta_time, &self.input);

            if let Some(state) = self.manager.state() {
                self.camera.update(&state.player, state.camera_mode);
                self.blender.request(state.player.locomotion);
            }
            self.blender.update(delta_time);
        }

        self.input.end_frame();
    }

    pub fn state(&self) -> Option<&SimulationState> {
        self.manager.state()
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        self.camera.uniform()
    }

    pub fn blender(&self) -> &AnimationBlender {
        &self.blender
    }

    pub fn loading_mut(&mut self) -> &mut LoadTracker {
        &mut self.loading
    }

    pub fn manager_mut(&mut self) -> &mut SimulationManager {
        &mut self.manager
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn performance(&self) -> &PerformanceMonitor {
        &self.performance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::CameraMode;
    use crate::simulation::player::Locomotion;

    const FRAME: f32 = 1.0 / 60.0;

    fn app() -> ExplorerApp {
        let mut config = ExplorerConfig::default();
        config.world.rock_count = 0;
        ExplorerApp::new(config)
    }

    #[test]
    fn test_waits_for_assets() {
        let mut app = app();
        app.loading_mut().register(2);
        app.handle_key(KeyCode::KeyW, true, false);

        app.frame(FRAME);
        assert_eq!(app.state().unwrap().elapsed, 0.0);

        app.loading_mut().mark_loaded("base");
        app.loading_mut().mark_failed("npc", "missing");
        app.frame(FRAME);
        let state = app.state().unwrap();
        assert!(state.elapsed > 0.0);
        assert!(state.player.position.z > 20.0);
        assert_eq!(app.performance().get_metrics().total_frames, 2);
    }

    #[test]
    fn test_keys_drive_dance_and_camera() {
        let mut app = app();
        app.handle_key(KeyCode::KeyB, true, false);
        app.handle_key(KeyCode::KeyV, true, false);
        app.frame(FRAME);

        let state = app.state().unwrap();
        assert_eq!(state.player.locomotion, Locomotion::Dancing);
        assert_eq!(state.camera_mode, CameraMode::Overhead);
        assert_eq!(app.blender().current(), Locomotion::Dancing);
        assert!(app.blender().is_blending());

        // Held key does not toggle again
        app.handle_key(KeyCode::KeyB, true, true);
        app.frame(FRAME);
        assert_eq!(app.state().unwrap().player.locomotion, Locomotion::Dancing);
    }

    #[test]
    fn test_camera_follows_player() {
        let mut app = app();
        let start = app.camera().eye;
        app.handle_key(KeyCode::KeyW, true, false);
        for _ in 0..30 {
            app.frame(FRAME);
        }
        assert!(app.camera().eye.z > start.z);
        assert_eq!(app.camera().target.y, 4.0);
        assert_eq!(app.camera_uniform().view_position[3], 1.0);
    }

    #[test]
    fn test_window_events() {
        let mut app = app();
        app.handle_key(KeyCode::KeyW, true, false);
        assert!(app.handle_window_event(&WindowEvent::Focused(false)));
        assert!(!app.input_mut().is_held(Action::MoveForward));
        assert!(!app.handle_window_event(&WindowEvent::CloseRequested));
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut app = app();
        assert_eq!(app.handle_key(KeyCode::F12, true, false), None);
        assert_eq!(app.handle_key(KeyCode::KeyE, true, false), Some(Action::Interact));
    }
}
