/// Keyboard key identifier.
///
/// Only keys the viewer binds are named; everything else maps to
/// `Key::Unknown` with the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Tab,
    Digit1,
    Digit2,
    Digit3,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Mouse wheel delta as reported by the platform.
///
/// `Line` corresponds to "scroll lines" style input; `Pixel` is high precision.
/// Positive `y` means the wheel was rolled away from the user.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Vertical delta in the DOM convention: positive when scrolling down,
    /// i.e. when the wheel is rolled towards the user.
    #[inline]
    pub fn scroll_down(self) -> f32 {
        match self {
            MouseWheelDelta::Line { y, .. } | MouseWheelDelta::Pixel { y, .. } => -y,
        }
    }
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event.
///
/// Carries the pointer position at the time of the press/release, in logical
/// pixels. `None` when no pointer position has been reported since the
/// pointer last entered the window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub position: Option<(f32, f32)>,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    MouseWheel { delta: MouseWheelDelta },

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_towards_user_is_positive_scroll_down() {
        assert_eq!(MouseWheelDelta::Line { x: 0.0, y: -1.0 }.scroll_down(), 1.0);
        assert_eq!(MouseWheelDelta::Pixel { x: 3.0, y: 24.0 }.scroll_down(), -24.0);
    }
}
