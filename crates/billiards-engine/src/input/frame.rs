use super::types::InputEvent;

/// Input collected since the last drawn frame.
///
/// `InputState` holds what persists across frames (the pointer position);
/// `InputFrame` holds the events the pending frame has to apply.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }
}
