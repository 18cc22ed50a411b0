pub mod catalog;

pub use catalog::{AssetCatalog, AssetManifest, SpriteDesc};
