//! Flat draw-list encoding read by the TypeScript canvas renderer.
//! Must stay in sync with `protocol.ts`.
//!
//! Layout per frame (all values f32 / 4 bytes unless noted):
//! ```text
//! [Header: 8 floats]
//! [Commands: command_count × 12 floats]
//! [Text blob: UTF-8 bytes, referenced by offset/len from Text commands]
//! ```
//!
//! TypeScript reads the buffers through pointer accessors after each tick.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::api::game::GameConfig;
use crate::render::surface::{DrawCommand, Surface, TextAlign};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_COMMAND_COUNT: usize = 2;
pub const HEADER_TEXT_BYTES: usize = 3;
pub const HEADER_LOGICAL_WIDTH: usize = 4;
pub const HEADER_LOGICAL_HEIGHT: usize = 5;
pub const HEADER_DROPPED: usize = 6;
pub const HEADER_RESERVED: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// One encoded draw command: 12 floats = 48 bytes stride (wire format —
/// never changes).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawRecord {
    pub kind: f32,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub p0: f32,
    pub p1: f32,
    pub p2: f32,
}

impl DrawRecord {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const KIND_CLEAR: f32 = 0.0;
    pub const KIND_RECT: f32 = 1.0;
    pub const KIND_CIRCLE: f32 = 2.0;
    pub const KIND_LINE: f32 = 3.0;
    pub const KIND_TEXT: f32 = 4.0;
    pub const KIND_SPRITE: f32 = 5.0;
}

/// Runtime-computed buffer capacities, derived from the GameConfig.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_commands: usize,
    pub max_text_bytes: usize,
    pub command_floats: usize,
}

impl ProtocolLayout {
    pub fn new(max_commands: usize, max_text_bytes: usize) -> Self {
        Self {
            max_commands,
            max_text_bytes,
            command_floats: max_commands * DrawRecord::FLOATS,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_draw_commands, config.max_text_bytes)
    }
}

/// The encoded frame, reused across ticks to avoid reallocation.
pub struct EncodedFrame {
    pub header: [f32; HEADER_FLOATS],
    pub commands: Vec<f32>,
    pub text: Vec<u8>,
    frame_counter: f32,
}

impl EncodedFrame {
    pub fn with_layout(layout: &ProtocolLayout) -> Self {
        Self {
            header: [0.0; HEADER_FLOATS],
            commands: Vec::with_capacity(layout.command_floats),
            text: Vec::with_capacity(layout.max_text_bytes),
            frame_counter: 0.0,
        }
    }

    pub fn command_count(&self) -> u32 {
        (self.commands.len() / DrawRecord::FLOATS) as u32
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn commands_ptr(&self) -> *const f32 {
        self.commands.as_ptr()
    }

    pub fn text_ptr(&self) -> *const u8 {
        self.text.as_ptr()
    }

    pub fn text_len(&self) -> u32 {
        self.text.len() as u32
    }

    fn push_record(&mut self, rec: DrawRecord) {
        self.commands.extend_from_slice(bytemuck::cast_slice(&[rec]));
    }

    /// Encode the surface's draw list. Text past the blob capacity drops the
    /// whole command rather than emitting a dangling reference.
    pub fn encode(&mut self, surface: &Surface, logical: Vec2, layout: &ProtocolLayout) {
        self.commands.clear();
        self.text.clear();
        self.frame_counter += 1.0;

        let mut dropped = surface.dropped();
        for cmd in surface.commands().iter().take(layout.max_commands) {
            match cmd {
                DrawCommand::Clear { color } => self.push_record(DrawRecord {
                    kind: DrawRecord::KIND_CLEAR,
                    r: color.r,
                    g: color.g,
                    b: color.b,
                    a: color.a,
                    ..DrawRecord::default()
                }),
                DrawCommand::Rect {
                    pos,
                    size,
                    color,
                    filled,
                } => self.push_record(DrawRecord {
                    kind: DrawRecord::KIND_RECT,
                    x: pos.x,
                    y: pos.y,
                    w: size.x,
                    h: size.y,
                    r: color.r,
                    g: color.g,
                    b: color.b,
                    a: color.a,
                    p0: *filled as u32 as f32,
                    ..DrawRecord::default()
                }),
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                    filled,
                } => self.push_record(DrawRecord {
                    kind: DrawRecord::KIND_CIRCLE,
                    x: center.x,
                    y: center.y,
                    w: *radius,
                    r: color.r,
                    g: color.g,
                    b: color.b,
                    a: color.a,
                    p0: *filled as u32 as f32,
                    ..DrawRecord::default()
                }),
                DrawCommand::Line {
                    from,
                    to,
                    width,
                    color,
                } => self.push_record(DrawRecord {
                    kind: DrawRecord::KIND_LINE,
                    x: from.x,
                    y: from.y,
                    w: to.x,
                    h: to.y,
                    r: color.r,
                    g: color.g,
                    b: color.b,
                    a: color.a,
                    p0: *width,
                    ..DrawRecord::default()
                }),
                DrawCommand::Text {
                    pos,
                    size,
                    color,
                    align,
                    text,
                } => {
                    let bytes = text.as_bytes();
                    if self.text.len() + bytes.len() > layout.max_text_bytes {
                        dropped += 1;
                        continue;
                    }
                    let offset = self.text.len();
                    self.text.extend_from_slice(bytes);
                    self.push_record(DrawRecord {
                        kind: DrawRecord::KIND_TEXT,
                        x: pos.x,
                        y: pos.y,
                        w: *size,
                        r: color.r,
                        g: color.g,
                        b: color.b,
                        a: color.a,
                        p0: offset as f32,
                        p1: bytes.len() as f32,
                        p2: match align {
                            TextAlign::Left => 0.0,
                            TextAlign::Center => 1.0,
                            TextAlign::Right => 2.0,
                        },
                        ..DrawRecord::default()
                    });
                }
                DrawCommand::Sprite {
                    pos,
                    size,
                    atlas,
                    index,
                } => self.push_record(DrawRecord {
                    kind: DrawRecord::KIND_SPRITE,
                    x: pos.x,
                    y: pos.y,
                    w: size.x,
                    h: size.y,
                    p0: *atlas as f32,
                    p1: *index as f32,
                    ..DrawRecord::default()
                }),
            }
        }

        self.header[HEADER_VERSION] = PROTOCOL_VERSION;
        self.header[HEADER_FRAME_COUNTER] = self.frame_counter;
        self.header[HEADER_COMMAND_COUNT] = self.command_count() as f32;
        self.header[HEADER_TEXT_BYTES] = self.text.len() as f32;
        self.header[HEADER_LOGICAL_WIDTH] = logical.x;
        self.header[HEADER_LOGICAL_HEIGHT] = logical.y;
        self.header[HEADER_DROPPED] = dropped as f32;
        self.header[HEADER_RESERVED] = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::Color;

    fn layout() -> ProtocolLayout {
        ProtocolLayout::new(64, 256)
    }

    fn encode(surface: &Surface) -> EncodedFrame {
        let layout = layout();
        let mut frame = EncodedFrame::with_layout(&layout);
        frame.encode(surface, Vec2::new(1200.0, 800.0), &layout);
        frame
    }

    #[test]
    fn draw_record_is_12_floats() {
        assert_eq!(std::mem::size_of::<DrawRecord>(), 48);
        assert_eq!(DrawRecord::FLOATS, 12);
    }

    #[test]
    fn header_counts_commands_and_dimensions() {
        let mut s = Surface::new(64);
        s.begin_frame(Color::SKY);
        s.fill_rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), Color::RED);
        let frame = encode(&s);

        assert_eq!(frame.header[HEADER_VERSION], PROTOCOL_VERSION);
        assert_eq!(frame.header[HEADER_COMMAND_COUNT], 2.0);
        assert_eq!(frame.header[HEADER_LOGICAL_WIDTH], 1200.0);
        assert_eq!(frame.header[HEADER_LOGICAL_HEIGHT], 800.0);
        assert_eq!(frame.command_count(), 2);
    }

    #[test]
    fn rect_fields_survive_encoding() {
        let mut s = Surface::new(64);
        s.fill_rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), Color::RED);
        let frame = encode(&s);

        let rec: &[DrawRecord] = bytemuck::cast_slice(&frame.commands);
        assert_eq!(rec[0].kind, DrawRecord::KIND_RECT);
        assert_eq!(rec[0].x, 10.0);
        assert_eq!(rec[0].w, 30.0);
        assert_eq!(rec[0].p0, 1.0);
    }

    #[test]
    fn text_blob_offsets_reference_utf8() {
        let mut s = Surface::new(64);
        s.text("abc", Vec2::ZERO, 20.0, Color::WHITE);
        s.text_centered("defg", Vec2::ZERO, 20.0, Color::WHITE);
        let frame = encode(&s);

        let rec: &[DrawRecord] = bytemuck::cast_slice(&frame.commands);
        assert_eq!(rec[0].p0, 0.0);
        assert_eq!(rec[0].p1, 3.0);
        assert_eq!(rec[0].p2, 0.0);
        assert_eq!(rec[1].p0, 3.0);
        assert_eq!(rec[1].p1, 4.0);
        assert_eq!(rec[1].p2, 1.0);
        assert_eq!(&frame.text, b"abcdefg");
    }

    #[test]
    fn oversized_text_drops_the_command_not_the_frame() {
        let layout = ProtocolLayout::new(64, 4);
        let mut s = Surface::new(64);
        s.text("this will not fit", Vec2::ZERO, 20.0, Color::WHITE);
        s.fill_rect(Vec2::ZERO, Vec2::ONE, Color::RED);
        let mut frame = EncodedFrame::with_layout(&layout);
        frame.encode(&s, Vec2::new(1200.0, 800.0), &layout);

        assert_eq!(frame.command_count(), 1);
        assert_eq!(frame.header[HEADER_DROPPED], 1.0);
    }

    #[test]
    fn frame_counter_increments() {
        let layout = layout();
        let s = Surface::new(8);
        let mut frame = EncodedFrame::with_layout(&layout);
        frame.encode(&s, Vec2::ZERO, &layout);
        frame.encode(&s, Vec2::ZERO, &layout);
        assert_eq!(frame.header[HEADER_FRAME_COUNTER], 2.0);
    }
}
