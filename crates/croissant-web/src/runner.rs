use croissant_engine::{
    map_client_to_logical, Color, EncodedFrame, FrameClock, Game, GameConfig, GameContext,
    InputEvent, InputQueue, ProtocolLayout, SceneEvent, Surface,
};
use glam::Vec2;

/// Generic game runner that wires up the engine loop.
///
/// The concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_game!`), because
/// wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: GameContext,
    input: InputQueue,
    surface: Surface,
    clock: FrameClock,
    config: GameConfig,
    layout: ProtocolLayout,
    frame: EncodedFrame,
    /// Flat buffer of sound event IDs for JS reads.
    sound_buffer: Vec<u8>,
    /// Flat buffer of scene events (kind, a, b, c per event).
    event_buffer: Vec<f32>,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G, seed: u64) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let ctx = GameContext::new(&config, seed);

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            surface: Surface::new(config.max_draw_commands),
            clock: FrameClock::new(config.max_frame_dt),
            frame: EncodedFrame::with_layout(&layout),
            sound_buffer: Vec::with_capacity(config.max_sounds),
            event_buffer: Vec::with_capacity(config.max_events * SceneEvent::FLOATS),
            config,
            layout,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction. Seeds progress
    /// from the persistence collaborator when a snapshot exists; a failed
    /// load is simply "no prior state".
    pub fn init(&mut self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(snapshot) = crate::storage::load_player_data() {
            self.ctx.seed_progress(snapshot);
        }
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Run one frame: clock → input → update → render → encode → save.
    pub fn tick(&mut self, now_ms: f64) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();
        let dt = self.clock.tick(now_ms);

        for event in self.input.drain() {
            self.ctx.input.apply(event);
        }

        self.game.update(&mut self.ctx, dt);

        self.surface.begin_frame(Color::BLACK);
        self.game.render(&self.ctx, &mut self.surface);
        self.frame.encode(
            &self.surface,
            Vec2::new(self.ctx.width(), self.ctx.height()),
            &self.layout,
        );

        self.sound_buffer.clear();
        for sound in self.ctx.sounds() {
            self.sound_buffer.push(sound.0 as u8);
        }
        self.event_buffer.clear();
        for event in self.ctx.events() {
            self.event_buffer
                .extend_from_slice(&[event.kind, event.a, event.b, event.c]);
        }

        self.ctx.input.end_frame();

        // Best-effort, fire-and-forget: a failed save is "retry next time".
        if self.ctx.take_progress_dirty() {
            #[cfg(target_arch = "wasm32")]
            {
                let _ = crate::storage::save_player_data(&self.ctx.progress_snapshot());
            }
        }
    }

    // ---- Input (client coordinates are mapped to logical space here) ----

    fn map(&self, client_x: f32, client_y: f32, view_w: f32, view_h: f32) -> Vec2 {
        map_client_to_logical(
            Vec2::new(client_x, client_y),
            Vec2::new(view_w, view_h),
            Vec2::new(self.config.logical_width, self.config.logical_height),
        )
    }

    pub fn pointer_down(&mut self, client_x: f32, client_y: f32, view_w: f32, view_h: f32) {
        let p = self.map(client_x, client_y, view_w, view_h);
        self.input.push(InputEvent::PointerDown { x: p.x, y: p.y });
    }

    pub fn pointer_up(&mut self, client_x: f32, client_y: f32, view_w: f32, view_h: f32) {
        let p = self.map(client_x, client_y, view_w, view_h);
        self.input.push(InputEvent::PointerUp { x: p.x, y: p.y });
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32, view_w: f32, view_h: f32) {
        let p = self.map(client_x, client_y, view_w, view_h);
        self.input.push(InputEvent::PointerMove { x: p.x, y: p.y });
    }

    pub fn key_down(&mut self, key: &str) {
        self.input.push(InputEvent::KeyDown {
            key: key.to_string(),
        });
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.push(InputEvent::KeyUp {
            key: key.to_string(),
        });
    }

    /// Called when a DOM text field gains/loses focus.
    pub fn set_capture(&mut self, enabled: bool) {
        self.input.push(InputEvent::SetCapture { enabled });
    }

    // ---- Assets ----

    pub fn load_manifest(&mut self, json: &str) {
        if let Err(e) = self.ctx.assets.load_manifest(json) {
            log::error!("asset manifest rejected: {}", e);
        }
    }

    pub fn atlas_ready(&mut self, atlas: u32) {
        self.ctx.assets.mark_atlas_ready(atlas);
    }

    // ---- Pointer accessors for JS reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.frame.header_ptr()
    }

    pub fn commands_ptr(&self) -> *const f32 {
        self.frame.commands_ptr()
    }

    pub fn command_count(&self) -> u32 {
        self.frame.command_count()
    }

    pub fn text_ptr(&self) -> *const u8 {
        self.frame.text_ptr()
    }

    pub fn text_len(&self) -> u32 {
        self.frame.text_len()
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn scene_events_ptr(&self) -> *const f32 {
        self.event_buffer.as_ptr()
    }

    pub fn scene_events_len(&self) -> u32 {
        (self.event_buffer.len() / SceneEvent::FLOATS) as u32
    }

    pub fn logical_width(&self) -> f32 {
        self.config.logical_width
    }

    pub fn logical_height(&self) -> f32 {
        self.config.logical_height
    }
}
