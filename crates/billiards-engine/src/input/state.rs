use super::frame::InputFrame;
use super::types::{InputEvent, PointerMoveEvent};

/// Current input state for the window.
///
/// Tracks the last known pointer position, which the platform layer needs to
/// position button events. Events are queued into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,
}

impl InputState {
    /// Applies an input event to the current state and queues it in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            _ => {}
        }

        frame.push_event(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseButton, MouseButtonState, PointerButtonEvent};

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    #[test]
    fn events_are_queued_in_order() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, moved(1.0, 2.0));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert_eq!(frame.events, vec![moved(1.0, 2.0), InputEvent::Focused(false)]);

        frame.clear();
        assert!(frame.events.is_empty());
    }

    #[test]
    fn pointer_left_forgets_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, moved(1.0, 2.0));
        assert_eq!(state.pointer_pos, Some((1.0, 2.0)));
        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }

    #[test]
    fn unpositioned_button_keeps_unknown_pointer() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(
            &mut frame,
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                position: None,
            }),
        );
        assert_eq!(state.pointer_pos, None);
    }
}
