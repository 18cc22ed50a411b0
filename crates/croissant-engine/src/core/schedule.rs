//! Cooperative scheduled-action queue.
//!
//! Replaces platform timer callbacks: a scene pushes an action with a delay
//! and drains due actions from its own `update`, so deferred work (the chess
//! AI reply, a memory-card flip-back) stays on the frame loop instead of
//! racing it.

/// Actions scheduled against elapsed frame time.
pub struct ActionQueue<T> {
    pending: Vec<(f32, T)>,
}

impl<T> ActionQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Schedule `action` to become due after `delay` seconds.
    pub fn push(&mut self, delay: f32, action: T) {
        self.pending.push((delay.max(0.0), action));
    }

    /// Advance all timers by `dt` and return the actions that came due, in
    /// the order they were scheduled.
    pub fn tick(&mut self, dt: f32) -> Vec<T> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            self.pending[i].0 -= dt;
            if self.pending[i].0 <= 0.0 {
                due.push(self.pending.remove(i).1);
            } else {
                i += 1;
            }
        }
        due
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<T> Default for ActionQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
