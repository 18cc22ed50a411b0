use wasm_bindgen::prelude::*;

mod game;
mod scenes;

use game::CroissantAdventure;

croissant_web::export_game!(CroissantAdventure, "croissant-adventure");
