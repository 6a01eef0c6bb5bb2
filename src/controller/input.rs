/// Platform-agnostic input handling
use egui::{pos2, Modifiers, PointerButton};

/// Platform-independent input events, positions in UI points
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMove { x: f32, y: f32 },
    PointerButton { button: MouseButton, pressed: bool, x: f32, y: f32 },
    Wheel { delta_y: f32 },
    FocusLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn from_web_button(button: i16) -> Self {
        match button {
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            _ => MouseButton::Left,
        }
    }

    fn to_egui(self) -> PointerButton {
        match self {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            MouseButton::Middle => PointerButton::Middle,
        }
    }
}

/// Accumulated pointer state between two frames
#[derive(Default)]
pub struct InputState {
    pub pointer_pos: Option<(f32, f32)>,
    pub dragging: bool,
    drag_delta: (f32, f32),
    wheel_delta: f32,
    egui_events: Vec<egui::Event>,
    /// Queue pointer events for egui. Only the web loop drains the queue;
    /// natively egui-winit already feeds the same events to egui.
    pub forward_to_egui: bool,
    /// Set each frame when the pointer is over the debug panel
    pub ui_captures_pointer: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_egui(&mut self, event: egui::Event) {
        if self.forward_to_egui {
            self.egui_events.push(event);
        }
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { x, y } => {
                if self.dragging {
                    if let Some((px, py)) = self.pointer_pos {
                        self.drag_delta.0 += x - px;
                        self.drag_delta.1 += y - py;
                    }
                }
                self.pointer_pos = Some((x, y));
                self.push_egui(egui::Event::PointerMoved(pos2(x, y)));
            }
            InputEvent::PointerButton { button, pressed, x, y } => {
                self.pointer_pos = Some((x, y));
                if button == MouseButton::Left {
                    // a drag that starts on the panel belongs to the panel
                    self.dragging = pressed && !self.ui_captures_pointer;
                }
                self.push_egui(egui::Event::PointerButton {
                    pos: pos2(x, y),
                    button: button.to_egui(),
                    pressed,
                    modifiers: Modifiers::default(),
                });
            }
            InputEvent::Wheel { delta_y } => {
                if !self.ui_captures_pointer {
                    self.wheel_delta += delta_y;
                }
            }
            InputEvent::FocusLost => {
                self.dragging = false;
                self.pointer_pos = None;
                self.push_egui(egui::Event::PointerGone);
            }
        }
    }

    pub fn consume_drag(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.drag_delta)
    }

    pub fn consume_wheel(&mut self) -> f32 {
        std::mem::take(&mut self.wheel_delta)
    }

    /// Events for an egui context that has no platform integration of its own
    pub fn take_egui_events(&mut self) -> Vec<egui::Event> {
        std::mem::take(&mut self.egui_events)
    }
}

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use super::*;
    use web_sys::{MouseEvent, WheelEvent};

    pub fn mouse_move_to_input(e: &MouseEvent) -> InputEvent {
        InputEvent::PointerMove { x: e.offset_x() as f32, y: e.offset_y() as f32 }
    }

    pub fn mouse_button_to_input(e: &MouseEvent, pressed: bool) -> InputEvent {
        InputEvent::PointerButton {
            button: MouseButton::from_web_button(e.button()),
            pressed,
            x: e.offset_x() as f32,
            y: e.offset_y() as f32,
        }
    }

    pub fn wheel_to_input(e: &WheelEvent) -> InputEvent {
        InputEvent::Wheel { delta_y: e.delta_y() as f32 }
    }
}
