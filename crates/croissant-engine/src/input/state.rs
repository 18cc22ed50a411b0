//! Per-frame keyboard/mouse state.
//!
//! Key names are lower-cased on the way in so lookups are case-insensitive.
//! The mouse-down click is a one-shot signal: whichever handler acts on it
//! must consume it, so a single physical click never fires two overlapping
//! hit zones in the same frame (exit button before game content).

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use crate::input::queue::InputEvent;

/// Map client (CSS pixel) coordinates to logical canvas coordinates through
/// the ratio of the logical size to the on-screen rendered size.
pub fn map_client_to_logical(
    client: Vec2,
    view_size: Vec2,
    logical_size: Vec2,
) -> Vec2 {
    if view_size.x <= 0.0 || view_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        client.x * logical_size.x / view_size.x,
        client.y * logical_size.y / view_size.y,
    )
}

pub struct InputState {
    keys: HashMap<String, bool>,
    just_pressed: HashSet<String>,
    mouse: Vec2,
    mouse_down: bool,
    click: Option<Vec2>,
    capture: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
            just_pressed: HashSet::new(),
            mouse: Vec2::ZERO,
            mouse_down: false,
            click: None,
            capture: true,
        }
    }

    /// Apply one drained input event to the frame state.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.mouse = Vec2::new(x, y);
                self.mouse_down = true;
                self.click = Some(self.mouse);
            }
            InputEvent::PointerUp { x, y } => {
                self.mouse = Vec2::new(x, y);
                self.mouse_down = false;
            }
            InputEvent::PointerMove { x, y } => {
                self.mouse = Vec2::new(x, y);
            }
            InputEvent::KeyDown { key } => {
                if self.capture {
                    let key = key.to_lowercase();
                    let held = self.keys.insert(key.clone(), true);
                    if held != Some(true) {
                        self.just_pressed.insert(key);
                    }
                }
            }
            InputEvent::KeyUp { key } => {
                if self.capture {
                    self.keys.insert(key.to_lowercase(), false);
                }
            }
            InputEvent::SetCapture { enabled } => {
                self.capture = enabled;
                if !enabled {
                    // Release everything so no key sticks while typing.
                    self.keys.clear();
                    self.just_pressed.clear();
                    self.mouse_down = false;
                    self.click = None;
                }
            }
        }
    }

    /// Case-insensitive held-key query.
    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.keys
            .get(&key.to_lowercase())
            .copied()
            .unwrap_or(false)
    }

    /// Whether the key transitioned to pressed this frame.
    pub fn key_just_pressed(&self, key: &str) -> bool {
        self.just_pressed.contains(&key.to_lowercase())
    }

    /// Mouse position in logical canvas coordinates.
    pub fn mouse_pos(&self) -> Vec2 {
        self.mouse
    }

    /// Level-triggered button state (for dragging, e.g. painting).
    pub fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    /// Peek at this frame's unconsumed click, if any.
    pub fn click_pos(&self) -> Option<Vec2> {
        self.click
    }

    /// Consume the click so no later hit-test acts on the same press.
    pub fn consume_click(&mut self) -> Option<Vec2> {
        self.click.take()
    }

    /// Drop one-shot state at the end of a frame. Held keys and the
    /// level-triggered mouse button survive; clicks and edges do not.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.click = None;
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let mut s = InputState::new();
        s.apply(InputEvent::KeyDown {
            key: "ArrowLeft".to_string(),
        });
        assert!(s.is_key_pressed("arrowleft"));
        assert!(s.is_key_pressed("ARROWLEFT"));
        s.apply(InputEvent::KeyUp {
            key: "arrowLEFT".to_string(),
        });
        assert!(!s.is_key_pressed("arrowleft"));
    }

    #[test]
    fn just_pressed_fires_once_per_press() {
        let mut s = InputState::new();
        s.apply(InputEvent::KeyDown {
            key: "r".to_string(),
        });
        assert!(s.key_just_pressed("r"));
        s.end_frame();
        // Key repeat: still held, but not a fresh press.
        s.apply(InputEvent::KeyDown {
            key: "r".to_string(),
        });
        assert!(!s.key_just_pressed("r"));
        assert!(s.is_key_pressed("r"));
    }

    #[test]
    fn click_is_one_shot() {
        let mut s = InputState::new();
        s.apply(InputEvent::PointerDown { x: 5.0, y: 6.0 });
        assert_eq!(s.click_pos(), Some(Vec2::new(5.0, 6.0)));
        assert_eq!(s.consume_click(), Some(Vec2::new(5.0, 6.0)));
        // A second consumer in the same frame sees nothing.
        assert_eq!(s.click_pos(), None);
        assert_eq!(s.consume_click(), None);
        // But the level-triggered state is still down until PointerUp.
        assert!(s.is_mouse_down());
    }

    #[test]
    fn unconsumed_click_dies_with_the_frame() {
        let mut s = InputState::new();
        s.apply(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        s.end_frame();
        assert_eq!(s.click_pos(), None);
        assert!(s.is_mouse_down());
    }

    #[test]
    fn capture_off_suppresses_keys_and_releases_held() {
        let mut s = InputState::new();
        s.apply(InputEvent::KeyDown {
            key: "w".to_string(),
        });
        assert!(s.is_key_pressed("w"));
        s.apply(InputEvent::SetCapture { enabled: false });
        assert!(!s.is_key_pressed("w"));
        s.apply(InputEvent::KeyDown {
            key: "w".to_string(),
        });
        assert!(!s.is_key_pressed("w"));
        s.apply(InputEvent::SetCapture { enabled: true });
        s.apply(InputEvent::KeyDown {
            key: "w".to_string(),
        });
        assert!(s.is_key_pressed("w"));
    }

    #[test]
    fn client_to_logical_scales_by_display_ratio() {
        // Logical 1200×800 canvas displayed at 600×400 CSS pixels.
        let p = map_client_to_logical(
            Vec2::new(300.0, 100.0),
            Vec2::new(600.0, 400.0),
            Vec2::new(1200.0, 800.0),
        );
        assert_eq!(p, Vec2::new(600.0, 200.0));
    }

    #[test]
    fn client_to_logical_degenerate_view() {
        let p = map_client_to_logical(
            Vec2::new(300.0, 100.0),
            Vec2::ZERO,
            Vec2::new(1200.0, 800.0),
        );
        assert_eq!(p, Vec2::ZERO);
    }
}
