//! Logical-space draw-command list.
//!
//! Scenes author all drawing against the fixed logical canvas (1200×800 by
//! default); the TypeScript renderer interprets the encoded command stream on
//! a 2D canvas and handles device-pixel scaling. The list is rebuilt from
//! scratch every frame.

use glam::Vec2;

use crate::assets::catalog::AssetCatalog;
use crate::render::color::Color;

/// Horizontal text alignment relative to the anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// One drawing primitive in logical canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Color,
        filled: bool,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        filled: bool,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Text {
        pos: Vec2,
        size: f32,
        color: Color,
        align: TextAlign,
        text: String,
    },
    Sprite {
        pos: Vec2,
        size: Vec2,
        atlas: u32,
        index: u32,
    },
}

/// The per-frame draw list. Commands beyond the configured capacity are
/// dropped and counted so the runner can log the overflow.
pub struct Surface {
    commands: Vec<DrawCommand>,
    capacity: usize,
    dropped: u32,
}

impl Surface {
    pub fn new(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Reset the list and clear the canvas to `color`. Called once at the
    /// start of every frame before the active scene renders.
    pub fn begin_frame(&mut self, color: Color) {
        self.commands.clear();
        self.dropped = 0;
        self.push(DrawCommand::Clear { color });
    }

    pub fn push(&mut self, cmd: DrawCommand) {
        if self.commands.len() >= self.capacity {
            self.dropped += 1;
            return;
        }
        self.commands.push(cmd);
    }

    pub fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.push(DrawCommand::Rect {
            pos,
            size,
            color,
            filled: true,
        });
    }

    pub fn stroke_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.push(DrawCommand::Rect {
            pos,
            size,
            color,
            filled: false,
        });
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            color,
            filled: true,
        });
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            color,
            filled: false,
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, color: Color) {
        self.push(DrawCommand::Text {
            pos,
            size,
            color,
            align: TextAlign::Left,
            text: text.into(),
        });
    }

    pub fn text_centered(&mut self, text: impl Into<String>, pos: Vec2, size: f32, color: Color) {
        self.push(DrawCommand::Text {
            pos,
            size,
            color,
            align: TextAlign::Center,
            text: text.into(),
        });
    }

    /// Draw a named sprite, or a deterministic placeholder rect while its
    /// atlas has not finished loading (or the name is unknown).
    pub fn sprite(&mut self, catalog: &AssetCatalog, name: &str, pos: Vec2, size: Vec2) {
        match catalog.sprite(name) {
            Some((desc, true)) => self.push(DrawCommand::Sprite {
                pos,
                size,
                atlas: desc.atlas,
                index: desc.index,
            }),
            _ => self.fill_rect(pos, size, Color::GRAY),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of commands dropped since `begin_frame` because the list was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_frame_resets_and_clears() {
        let mut s = Surface::new(16);
        s.fill_rect(Vec2::ZERO, Vec2::ONE, Color::RED);
        s.begin_frame(Color::SKY);
        assert_eq!(s.len(), 1);
        assert!(matches!(s.commands()[0], DrawCommand::Clear { .. }));
    }

    #[test]
    fn capacity_overflow_is_counted_not_grown() {
        let mut s = Surface::new(2);
        s.begin_frame(Color::BLACK);
        s.fill_rect(Vec2::ZERO, Vec2::ONE, Color::RED);
        s.fill_rect(Vec2::ZERO, Vec2::ONE, Color::RED);
        assert_eq!(s.len(), 2);
        assert_eq!(s.dropped(), 1);
    }

    #[test]
    fn unknown_sprite_falls_back_to_rect() {
        let mut s = Surface::new(8);
        let catalog = AssetCatalog::new();
        s.sprite(&catalog, "croissant", Vec2::ZERO, Vec2::splat(32.0));
        assert!(matches!(
            s.commands()[0],
            DrawCommand::Rect { filled: true, .. }
        ));
    }
}
