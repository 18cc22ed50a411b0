//! Canonical scene registry keys. `request_scene` with any other string is a
//! logged no-op.

pub const MAIN_MENU: &str = "mainMenu";
pub const WORLD_MAP: &str = "worldMap";

pub const COIN_COLLECTOR: &str = "coinCollector";
pub const ROULETTE: &str = "roulette";
pub const CHESS: &str = "chess";
pub const MAZE: &str = "maze";
pub const SHOOTER: &str = "shooter";
pub const PLATFORM: &str = "platform";
pub const MEMORY: &str = "memory";
pub const SNAKE: &str = "snake";
pub const PUZZLE: &str = "puzzle";
pub const RHYTHM: &str = "rhythm";
pub const PAINT_GAME: &str = "paintGame";
pub const FISHING: &str = "fishing";

/// World-map portal order: four columns per row, top-left to bottom-right.
pub const MINIGAMES: [&str; 12] = [
    COIN_COLLECTOR,
    ROULETTE,
    CHESS,
    MAZE,
    SHOOTER,
    PLATFORM,
    MEMORY,
    SNAKE,
    PUZZLE,
    RHYTHM,
    PAINT_GAME,
    FISHING,
];
