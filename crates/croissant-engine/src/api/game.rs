use crate::api::types::{SceneEvent, SoundEvent};
use crate::assets::catalog::AssetCatalog;
use crate::core::progress::{PlayerProgress, PlayerSnapshot};
use crate::input::state::InputState;
use crate::render::surface::Surface;
use crate::util::rng::Rng;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Logical canvas width in game units. All scenes author against this.
    pub logical_width: f32,
    /// Logical canvas height in game units.
    pub logical_height: f32,
    /// Maximum number of draw commands per frame (default: 2048).
    pub max_draw_commands: usize,
    /// Maximum bytes of text payload per frame (default: 8192).
    pub max_text_bytes: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of scene events per frame (default: 32).
    pub max_events: usize,
    /// Frame-delta clamp in seconds (default: 0.25).
    pub max_frame_dt: f32,
    /// Scene the stage switches to after init.
    pub start_scene: &'static str,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            logical_width: 1200.0,
            logical_height: 800.0,
            max_draw_commands: 2048,
            max_text_bytes: 8192,
            max_sounds: 32,
            max_events: 32,
            max_frame_dt: 0.25,
            start_scene: "mainMenu",
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Register scenes and switch to the start scene.
    fn init(&mut self, ctx: &mut GameContext);

    /// The game loop tick. `dt` is the frame delta in seconds.
    fn update(&mut self, ctx: &mut GameContext, dt: f32);

    /// Read-only render pass into the per-frame draw list.
    fn render(&self, ctx: &GameContext, surface: &mut Surface);
}

/// Mutable access to shared game state, passed into every scene call.
///
/// Single-writer discipline: score, coins and achievements are mutated only
/// through [`GameContext::add_points`]; the pending scene request only
/// through [`GameContext::request_scene`].
pub struct GameContext {
    width: f32,
    height: f32,
    pub input: InputState,
    pub assets: AssetCatalog,
    progress: PlayerProgress,
    rng: Rng,
    pending_scene: Option<String>,
    sounds: Vec<SoundEvent>,
    events: Vec<SceneEvent>,
    max_sounds: usize,
    max_events: usize,
    progress_dirty: bool,
}

impl GameContext {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        Self {
            width: config.logical_width,
            height: config.logical_height,
            input: InputState::new(),
            assets: AssetCatalog::new(),
            progress: PlayerProgress::new(),
            rng: Rng::new(seed),
            pending_scene: None,
            sounds: Vec::new(),
            events: Vec::new(),
            max_sounds: config.max_sounds,
            max_events: config.max_events,
            progress_dirty: false,
        }
    }

    /// Logical canvas width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Logical canvas height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Convenience delegation to the input state.
    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.input.is_key_pressed(key)
    }

    /// Draw a fresh seed for minigame-local randomness.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// The sole score/achievement mutation entry point.
    pub fn add_points(&mut self, amount: i64, src: &str) {
        self.progress.add_points(amount, src);
        self.progress_dirty = true;
        self.emit_event(SceneEvent {
            kind: SceneEvent::KIND_SCORE_CHANGED,
            a: self.progress.score() as f32,
            b: 0.0,
            c: 0.0,
        });
    }

    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    /// Seed progress from a loaded snapshot at startup.
    pub fn seed_progress(&mut self, snapshot: PlayerSnapshot) {
        self.progress.restore(snapshot);
    }

    pub fn progress_snapshot(&self) -> PlayerSnapshot {
        self.progress.snapshot()
    }

    /// True once per mutation batch; the runner uses it for best-effort saves.
    pub fn take_progress_dirty(&mut self) -> bool {
        std::mem::take(&mut self.progress_dirty)
    }

    /// Ask the stage to switch scenes after the current update completes.
    /// Unknown names are a no-op at switch time.
    pub fn request_scene(&mut self, name: &str) {
        self.pending_scene = Some(name.to_string());
    }

    pub fn take_scene_request(&mut self) -> Option<String> {
        self.pending_scene.take()
    }

    /// Emit a sound event to be forwarded to TypeScript.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        if self.sounds.len() < self.max_sounds {
            self.sounds.push(event);
        }
    }

    pub fn emit_event(&mut self, event: SceneEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        }
    }

    pub fn sounds(&self) -> &[SoundEvent] {
        &self.sounds
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::progress::source;

    fn ctx() -> GameContext {
        GameContext::new(&GameConfig::default(), 42)
    }

    #[test]
    fn add_points_marks_dirty_and_emits_score_event() {
        let mut ctx = ctx();
        ctx.add_points(10, source::COIN);
        assert_eq!(ctx.progress().score(), 10);
        assert!(ctx.take_progress_dirty());
        assert!(!ctx.take_progress_dirty());
        assert_eq!(ctx.events().len(), 1);
        assert_eq!(ctx.events()[0].kind, SceneEvent::KIND_SCORE_CHANGED);
        assert_eq!(ctx.events()[0].a, 10.0);
    }

    #[test]
    fn scene_request_is_taken_once() {
        let mut ctx = ctx();
        ctx.request_scene("worldMap");
        assert_eq!(ctx.take_scene_request().as_deref(), Some("worldMap"));
        assert_eq!(ctx.take_scene_request(), None);
    }

    #[test]
    fn sound_and_event_buffers_are_bounded() {
        let mut ctx = GameContext::new(
            &GameConfig {
                max_sounds: 2,
                max_events: 1,
                ..GameConfig::default()
            },
            1,
        );
        for i in 0..5 {
            ctx.emit_sound(SoundEvent(i));
        }
        assert_eq!(ctx.sounds().len(), 2);
        ctx.add_points(1, "snake");
        ctx.add_points(1, "snake");
        assert_eq!(ctx.events().len(), 1);
        ctx.clear_frame_data();
        assert!(ctx.sounds().is_empty());
        assert!(ctx.events().is_empty());
    }

    #[test]
    fn next_seed_varies() {
        let mut ctx = ctx();
        assert_ne!(ctx.next_seed(), ctx.next_seed());
    }
}
