pub mod runner;
pub mod storage;

pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates the `thread_local!` storage for the GameRunner, a
/// `with_runner()` helper, and every export the browser shell calls:
/// init/tick, pointer and key input (client coordinates plus the canvas's
/// on-screen size, mapped to logical space in Rust), the capture toggle for
/// DOM text fields, asset hooks, and the draw/sound/event accessors.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// croissant_web::export_game!(MyGame, "my-game");
/// ```
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow
                    .as_mut()
                    .expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init(seed: u32) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game, seed as u64);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(now_ms: f64) {
            with_runner(|r| r.tick(now_ms));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(client_x: f32, client_y: f32, view_w: f32, view_h: f32) {
            with_runner(|r| r.pointer_down(client_x, client_y, view_w, view_h));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(client_x: f32, client_y: f32, view_w: f32, view_h: f32) {
            with_runner(|r| r.pointer_up(client_x, client_y, view_w, view_h));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(client_x: f32, client_y: f32, view_w: f32, view_h: f32) {
            with_runner(|r| r.pointer_move(client_x, client_y, view_w, view_h));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key: &str) {
            with_runner(|r| r.key_down(key));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key: &str) {
            with_runner(|r| r.key_up(key));
        }

        #[wasm_bindgen]
        pub fn game_set_capture(enabled: bool) {
            with_runner(|r| r.set_capture(enabled));
        }

        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) {
            with_runner(|r| r.load_manifest(json));
        }

        #[wasm_bindgen]
        pub fn game_atlas_ready(atlas: u32) {
            with_runner(|r| r.atlas_ready(atlas));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr())
        }

        #[wasm_bindgen]
        pub fn get_commands_ptr() -> *const f32 {
            with_runner(|r| r.commands_ptr())
        }

        #[wasm_bindgen]
        pub fn get_command_count() -> u32 {
            with_runner(|r| r.command_count())
        }

        #[wasm_bindgen]
        pub fn get_text_ptr() -> *const u8 {
            with_runner(|r| r.text_ptr())
        }

        #[wasm_bindgen]
        pub fn get_text_len() -> u32 {
            with_runner(|r| r.text_len())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const u8 {
            with_runner(|r| r.sound_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len())
        }

        #[wasm_bindgen]
        pub fn get_scene_events_ptr() -> *const f32 {
            with_runner(|r| r.scene_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_scene_events_len() -> u32 {
            with_runner(|r| r.scene_events_len())
        }

        #[wasm_bindgen]
        pub fn get_logical_width() -> f32 {
            with_runner(|r| r.logical_width())
        }

        #[wasm_bindgen]
        pub fn get_logical_height() -> f32 {
            with_runner(|r| r.logical_height())
        }
    };
}
