pub mod main_menu;
pub mod minigames;
pub mod names;
pub mod world_map;

pub use main_menu::MainMenuScene;
pub use world_map::WorldMapScene;
