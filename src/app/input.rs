use crate::configurator::{ConfiguratorEvent, View};
use egui::Key;

/// Orbit speed for held arrow keys, in viewport pixels per second.
const AIM_PIXELS_PER_SECOND: f32 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    SwitchView(View),
    SubmitOrder,
    None,
}

#[derive(Default, Debug, Clone, Copy)]
pub struct InputState {
    pub aim_left: bool,
    pub aim_right: bool,
    pub aim_up: bool,
    pub aim_down: bool,
}

impl InputState {
    pub fn handle_key(&mut self, key: Key, pressed: bool) -> InputAction {
        match key {
            Key::ArrowLeft => self.aim_left = pressed,
            Key::ArrowRight => self.aim_right = pressed,
            Key::ArrowUp => self.aim_up = pressed,
            Key::ArrowDown => self.aim_down = pressed,
            _ if pressed => return shortcut(key),
            _ => {}
        }
        InputAction::None
    }

    /// Orbit drag equivalent of the held arrow keys over `dt` seconds.
    pub fn orbit_event(&self, dt: f32) -> Option<ConfiguratorEvent> {
        let axis = |negative: bool, positive: bool| match (negative, positive) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        let dx = axis(self.aim_left, self.aim_right) * AIM_PIXELS_PER_SECOND * dt;
        let dy = axis(self.aim_up, self.aim_down) * AIM_PIXELS_PER_SECOND * dt;
        (dx != 0.0 || dy != 0.0).then_some(ConfiguratorEvent::Orbit { dx, dy })
    }
}

fn shortcut(key: Key) -> InputAction {
    match key {
        Key::Num1 => InputAction::SwitchView(View::Overview),
        Key::Num2 => InputAction::SwitchView(View::Chasis),
        Key::Num3 => InputAction::SwitchView(View::Buttons),
        Key::Num4 => InputAction::SwitchView(View::Knobs),
        Key::Enter => InputAction::SubmitOrder,
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_switch_views() {
        let mut input = InputState::default();
        assert_eq!(
            input.handle_key(Key::Num3, true),
            InputAction::SwitchView(View::Buttons)
        );
        assert_eq!(input.handle_key(Key::Num3, false), InputAction::None);
        assert_eq!(input.handle_key(Key::Enter, true), InputAction::SubmitOrder);
        assert_eq!(input.handle_key(Key::Q, true), InputAction::None);
    }

    #[test]
    fn held_arrows_orbit_until_released() {
        let mut input = InputState::default();
        assert!(input.orbit_event(0.5).is_none());

        input.handle_key(Key::ArrowRight, true);
        input.handle_key(Key::ArrowUp, true);
        assert_eq!(
            input.orbit_event(0.5),
            Some(ConfiguratorEvent::Orbit { dx: 120.0, dy: -120.0 })
        );

        input.handle_key(Key::ArrowLeft, true);
        input.handle_key(Key::ArrowUp, false);
        assert!(input.orbit_event(0.5).is_none());
    }
}
