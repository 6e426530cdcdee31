//! Player input handling.
//!
//! Physical keys are mapped to named [`Action`]s by [`KeyBindings`]; the
//! simulation only ever reads [`InputState`]. Continuous actions are read as
//! held state. Toggles and one-shot commands are delivered as pulses: one per
//! key-down transition, never re-fired while the key is held or auto-repeats.

use std::collections::HashMap;

use winit::keyboard::KeyCode;

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBack,
    TurnLeft,
    TurnRight,
    Jetpack,
    ToggleDance,
    ToggleCamera,
    CallVehicle,
    Interact,
}

impl Action {
    /// Whether the action fires once per key-down rather than while held
    pub fn is_edge_triggered(self) -> bool {
        matches!(
            self,
            Action::ToggleDance | Action::ToggleCamera | Action::CallVehicle | Action::Interact
        )
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Per-frame action state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; 9],
    pulsed: [bool; 9],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an action as pressed
    ///
    /// Edge-triggered actions pulse only on the released -> pressed transition.
    pub fn press(&mut self, action: Action) {
        let i = action.index();
        if action.is_edge_triggered() && !self.held[i] {
            self.pulsed[i] = true;
        }
        self.held[i] = true;
    }

    pub fn release(&mut self, action: Action) {
        self.held[action.index()] = false;
    }

    /// Feed a raw keyboard event through the bindings
    ///
    /// # Arguments
    /// * `bindings` - Physical key to action map
    /// * `key` - Key that changed
    /// * `pressed` - New key state
    /// * `repeat` - Whether the platform flagged this as an auto-repeat
    ///
    /// # Returns
    /// The action the key is bound to, if any
    pub fn key_event(
        &mut self,
        bindings: &KeyBindings,
        key: KeyCode,
        pressed: bool,
        repeat: bool,
    ) -> Option<Action> {
        let action = bindings.action_for(key)?;
        if pressed {
            if !repeat {
                self.press(action);
            }
        } else {
            self.release(action);
        }
        Some(action)
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// Whether an edge-triggered action fired since the last `end_frame`
    pub fn was_pulsed(&self, action: Action) -> bool {
        self.pulsed[action.index()]
    }

    /// Whether any horizontal move key is held
    pub fn wants_to_move(&self) -> bool {
        self.is_held(Action::MoveForward) || self.is_held(Action::MoveBack)
    }

    /// Drop this frame's pulses; held state carries over
    pub fn end_frame(&mut self) {
        self.pulsed = [false; 9];
    }

    /// Release everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Physical key to logical action map
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<KeyCode, Action>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind `key` to `action`, replacing any previous binding of that key
    pub fn bind(&mut self, key: KeyCode, action: Action) -> &mut Self {
        self.map.insert(key, action);
        self
    }

    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        self.map.get(&key).copied()
    }

    /// Keys currently bound to `action`
    pub fn keys_for(&self, action: Action) -> Vec<KeyCode> {
        let mut keys: Vec<KeyCode> = self
            .map
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| *k)
            .collect();
        keys.sort_by_key(|k| format!("{k:?}"));
        keys
    }
}

impl Default for KeyBindings {
    /// WASD to move and turn, Space for the jetpack, B dance, V camera,
    /// C call a train, E board or leave it.
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings
            .bind(KeyCode::KeyW, Action::MoveForward)
            .bind(KeyCode::KeyS, Action::MoveBack)
            .bind(KeyCode::KeyA, Action::TurnLeft)
            .bind(KeyCode::KeyD, Action::TurnRight)
            .bind(KeyCode::Space, Action::Jetpack)
            .bind(KeyCode::KeyB, Action::ToggleDance)
            .bind(KeyCode::KeyV, Action::ToggleCamera)
            .bind(KeyCode::KeyC, Action::CallVehicle)
            .bind(KeyCode::KeyE, Action::Interact);
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_actions_do_not_pulse() {
        let mut input = InputState::new();
        input.press(Action::MoveForward);
        assert!(input.is_held(Action::MoveForward));
        assert!(!input.was_pulsed(Action::MoveForward));
        assert!(input.wants_to_move());
    }

    #[test]
    fn test_edge_action_pulses_once_per_press() {
        let mut input = InputState::new();
        input.press(Action::Interact);
        assert!(input.was_pulsed(Action::Interact));

        input.end_frame();
        input.press(Action::Interact); // still held
        assert!(!input.was_pulsed(Action::Interact));

        input.release(Action::Interact);
        input.press(Action::Interact);
        assert!(input.was_pulsed(Action::Interact));
    }

    #[test]
    fn test_auto_repeat_ignored() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();

        input.key_event(&bindings, KeyCode::KeyB, true, false);
        input.end_frame();
        input.key_event(&bindings, KeyCode::KeyB, true, true);
        assert!(!input.was_pulsed(Action::ToggleDance));

        input.key_event(&bindings, KeyCode::KeyB, false, false);
        assert!(!input.is_held(Action::ToggleDance));
    }

    #[test]
    fn test_unbound_key() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        assert_eq!(input.key_event(&bindings, KeyCode::KeyQ, true, false), None);
        assert_eq!(input, InputState::new());
    }

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.action_for(KeyCode::Space), Some(Action::Jetpack));
        assert_eq!(bindings.action_for(KeyCode::KeyC), Some(Action::CallVehicle));
        assert_eq!(bindings.keys_for(Action::TurnLeft), vec![KeyCode::KeyA]);
    }

    #[test]
    fn test_rebind() {
        let mut bindings = KeyBindings::default();
        bindings.bind(KeyCode::ArrowUp, Action::MoveForward);
        assert_eq!(bindings.keys_for(Action::MoveForward).len(), 2);
    }
}
