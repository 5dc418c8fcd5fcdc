//! Input mapping from winit events to movement intent and scanner commands

use std::collections::HashSet;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::controls::MoveState;
use crate::core::types::Vec2;

/// Scanner command produced by the keyboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanCommand {
    /// Trigger held (`true`) or released (`false`)
    SetActive(bool),
    /// Digit key pressed
    SelectPattern(u32),
}

/// Translates raw input into [`MoveState`] writes and queued [`ScanCommand`]s
pub struct InputMapper {
    /// Currently pressed keys
    keys_pressed: HashSet<KeyCode>,
    /// Alt modifier state; key-downs while held are ignored
    alt_held: bool,
    /// Whether the pointer is captured (mouse buttons and motion only count then)
    pointer_captured: bool,
    /// Active touches in arrival order; the first one steers
    touches: Vec<(u64, Vec2)>,
    /// Commands waiting for the simulation to drain
    commands: Vec<ScanCommand>,
}

impl InputMapper {
    pub fn new() -> Self {
        Self {
            keys_pressed: HashSet::new(),
            alt_held: false,
            pointer_captured: false,
            touches: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Process a window event
    pub fn process_event(&mut self, event: &WindowEvent, state: &mut MoveState) {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state: key_state,
                    ..
                },
                ..
            } => match key_state {
                ElementState::Pressed => self.key_down(*key_code, state),
                ElementState::Released => self.key_up(*key_code, state),
            },
            WindowEvent::ModifiersChanged(modifiers) => {
                self.alt_held = modifiers.state().alt_key();
            }
            WindowEvent::MouseInput { state: button_state, button, .. } => {
                self.mouse_button(*button, *button_state == ElementState::Pressed, state);
            }
            WindowEvent::Touch(touch) => {
                self.touch(
                    touch.id,
                    touch.phase,
                    touch.location.x as f32,
                    touch.location.y as f32,
                    state,
                );
            }
            WindowEvent::Focused(false) => self.release_all(state),
            _ => {}
        }
    }

    /// Process device event for raw mouse motion (when the pointer is captured)
    pub fn process_device_event(&mut self, event: &DeviceEvent, state: &mut MoveState) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse_motion(*delta, state);
        }
    }

    pub fn key_down(&mut self, key: KeyCode, state: &mut MoveState) {
        if self.alt_held {
            return;
        }
        self.keys_pressed.insert(key);

        match key {
            KeyCode::KeyW => state.forward = 1.0,
            KeyCode::KeyS => state.back = 1.0,
            KeyCode::KeyA => state.left = 1.0,
            KeyCode::KeyD => state.right = 1.0,
            KeyCode::ArrowUp => state.pitch_up = 1.0,
            KeyCode::ArrowDown => state.pitch_down = 1.0,
            KeyCode::ArrowLeft => state.yaw_left = 1.0,
            KeyCode::ArrowRight => state.yaw_right = 1.0,
            KeyCode::Space => self.commands.push(ScanCommand::SetActive(true)),
            _ => {
                if let Some(digit) = digit(key) {
                    self.commands.push(ScanCommand::SelectPattern(digit));
                }
            }
        }
    }

    pub fn key_up(&mut self, key: KeyCode, state: &mut MoveState) {
        self.keys_pressed.remove(&key);

        match key {
            KeyCode::KeyW => state.forward = 0.0,
            KeyCode::KeyS => state.back = 0.0,
            KeyCode::KeyA => state.left = 0.0,
            KeyCode::KeyD => state.right = 0.0,
            KeyCode::ArrowUp => state.pitch_up = 0.0,
            KeyCode::ArrowDown => state.pitch_down = 0.0,
            KeyCode::ArrowLeft => state.yaw_left = 0.0,
            KeyCode::ArrowRight => state.yaw_right = 0.0,
            KeyCode::Space => self.commands.push(ScanCommand::SetActive(false)),
            _ => {}
        }
    }

    /// Left button walks forward, right button walks back, while captured
    pub fn mouse_button(&mut self, button: MouseButton, pressed: bool, state: &mut MoveState) {
        if !self.pointer_captured {
            return;
        }
        let value = if pressed { 1.0 } else { 0.0 };
        match button {
            MouseButton::Left => state.forward = value,
            MouseButton::Right => state.back = value,
            _ => {}
        }
    }

    /// Relative pointer motion in pixels; ignored unless captured
    pub fn mouse_motion(&mut self, delta: (f64, f64), state: &mut MoveState) {
        if !self.pointer_captured {
            return;
        }
        state.yaw_left = -delta.0 as f32;
        state.pitch_down = delta.1 as f32;
    }

    /// Two or more touches walk forward; dragging the first touch turns
    pub fn touch(&mut self, id: u64, phase: TouchPhase, x: f32, y: f32, state: &mut MoveState) {
        let position = Vec2::new(x, y);
        match phase {
            TouchPhase::Started => {
                self.touches.push((id, position));
                state.forward = self.touch_walk();
            }
            TouchPhase::Moved => {
                let primary = self.touches.first().map(|&(first, _)| first);
                if let Some(entry) = self.touches.iter_mut().find(|(t, _)| *t == id) {
                    if primary == Some(id) {
                        state.yaw_left = position.x - entry.1.x;
                        state.pitch_down = entry.1.y - position.y;
                    }
                    entry.1 = position;
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.retain(|(t, _)| *t != id);
                state.forward = self.touch_walk();
            }
        }
    }

    fn touch_walk(&self) -> f32 {
        if self.touches.len() > 1 { 1.0 } else { 0.0 }
    }

    /// Drop every held key and touch, e.g. on focus loss
    pub fn release_all(&mut self, state: &mut MoveState) {
        let keys: Vec<KeyCode> = self.keys_pressed.iter().copied().collect();
        for key in keys {
            self.key_up(key, state);
        }
        self.touches.clear();
        *state = MoveState::default();
    }

    /// Take queued scanner commands in arrival order
    pub fn drain_commands(&mut self) -> std::vec::Drain<'_, ScanCommand> {
        self.commands.drain(..)
    }

    /// Check if key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Set pointer captured state
    pub fn set_pointer_captured(&mut self, captured: bool, state: &mut MoveState) {
        self.pointer_captured = captured;
        if !captured {
            state.forward = 0.0;
            state.back = 0.0;
        }
    }

    pub fn is_pointer_captured(&self) -> bool {
        self.pointer_captured
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new()
    }
}

fn digit(key: KeyCode) -> Option<u32> {
    let digit = match key {
        KeyCode::Digit0 => 0,
        KeyCode::Digit1 => 1,
        KeyCode::Digit2 => 2,
        KeyCode::Digit3 => 3,
        KeyCode::Digit4 => 4,
        KeyCode::Digit5 => 5,
        KeyCode::Digit6 => 6,
        KeyCode::Digit7 => 7,
        KeyCode::Digit8 => 8,
        KeyCode::Digit9 => 9,
        _ => return None,
    };
    Some(digit)
}
