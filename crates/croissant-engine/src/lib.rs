pub mod api;
pub mod assets;
pub mod bridge;
pub mod core;
pub mod input;
pub mod render;
pub mod util;

mod error;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, GameContext};
pub use api::types::{SceneEvent, SoundEvent};
pub use assets::catalog::{AssetCatalog, AssetManifest, SpriteDesc};
pub use bridge::protocol::{DrawRecord, EncodedFrame, ProtocolLayout};
pub use core::minigame::{MinigamePhase, MinigameShell, ShellConfig, ShellSignal};
pub use core::progress::{source, Achievements, PlayerProgress, PlayerSnapshot};
pub use core::scene::{Scene, SceneStage};
pub use core::schedule::ActionQueue;
pub use core::time::FrameClock;
pub use error::EngineError;
pub use input::queue::{InputEvent, InputQueue};
pub use input::state::{map_client_to_logical, InputState};
pub use render::color::Color;
pub use render::surface::{DrawCommand, Surface, TextAlign};
pub use util::geom::RectArea;
pub use util::rng::Rng;
