use bytemuck::{Pod, Zeroable};

/// A sound event emitted by game logic.
/// The numeric value maps to a game-defined sound in the TypeScript SoundManager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// An event communicated from Rust to TypeScript via flat buffers.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct SceneEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SceneEvent {
    pub const FLOATS: usize = 4;

    /// The active scene changed.
    pub const KIND_SCENE_CHANGED: f32 = 1.0;
    /// Cumulative score changed; `a` carries the new total.
    pub const KIND_SCORE_CHANGED: f32 = 2.0;
    /// Progress should be persisted; fired on significant events.
    pub const KIND_SAVE_REQUESTED: f32 = 3.0;
}
