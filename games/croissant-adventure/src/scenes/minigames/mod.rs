pub mod chess;
pub mod coin_collector;
pub mod fishing;
pub mod maze;
pub mod memory;
pub mod paint;
pub mod platform;
pub mod puzzle;
pub mod rhythm;
pub mod roulette;
pub mod shooter;
pub mod snake;

pub use chess::ChessScene;
pub use coin_collector::CoinCollectorScene;
pub use fishing::FishingScene;
pub use maze::MazeScene;
pub use memory::MemoryScene;
pub use paint::PaintScene;
pub use platform::PlatformScene;
pub use puzzle::PuzzleScene;
pub use rhythm::RhythmScene;
pub use roulette::RouletteScene;
pub use shooter::ShooterScene;
pub use snake::SnakeScene;
