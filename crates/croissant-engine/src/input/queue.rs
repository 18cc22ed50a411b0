/// Input event types the engine understands.
/// Pointer coordinates are already in logical canvas space — the platform
/// bridge maps client pixels through the logical/display ratio before
/// enqueueing, so CSS scaling never leaks into game code.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at logical coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at logical coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to logical coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A key was pressed. `key` is the normalized (lower-cased) key name.
    KeyDown { key: String },
    /// A key was released.
    KeyUp { key: String },
    /// Key capture toggled — false while a DOM text field has focus, so
    /// users can type into chat/login fields without moving the player.
    SetCapture { enabled: bool },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
