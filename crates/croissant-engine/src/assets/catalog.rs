//! Named sprite catalog with per-atlas readiness.
//!
//! Atlas images load fire-and-forget on the JS side; the bridge marks an
//! atlas ready when its decode completes. Renderers never wait: a sprite
//! whose atlas is still loading draws as a placeholder rect instead.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::EngineError;

/// One atlas in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct AtlasDesc {
    pub name: String,
    pub path: String,
}

/// A named sprite: which atlas and which cell index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SpriteDesc {
    pub atlas: u32,
    pub index: u32,
}

/// Parsed asset manifest (JSON, authored alongside the TypeScript renderer).
#[derive(Debug, Clone, Deserialize)]
pub struct AssetManifest {
    pub atlases: Vec<AtlasDesc>,
    pub sprites: HashMap<String, SpriteDesc>,
}

impl AssetManifest {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::Manifest(e.to_string()))
    }
}

/// Runtime catalog: sprite lookup plus atlas readiness flags.
pub struct AssetCatalog {
    sprites: HashMap<String, SpriteDesc>,
    atlas_ready: Vec<bool>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self {
            sprites: HashMap::new(),
            atlas_ready: Vec::new(),
        }
    }

    pub fn load_manifest(&mut self, json: &str) -> Result<(), EngineError> {
        let manifest = AssetManifest::from_json(json)?;
        self.atlas_ready = vec![false; manifest.atlases.len()];
        self.sprites = manifest.sprites;
        Ok(())
    }

    /// Mark an atlas as decoded and drawable. Out-of-range indices are ignored.
    pub fn mark_atlas_ready(&mut self, atlas: u32) {
        if let Some(flag) = self.atlas_ready.get_mut(atlas as usize) {
            *flag = true;
        }
    }

    /// Look up a sprite by name, along with whether its atlas is ready.
    pub fn sprite(&self, name: &str) -> Option<(SpriteDesc, bool)> {
        let desc = *self.sprites.get(name)?;
        let ready = self
            .atlas_ready
            .get(desc.atlas as usize)
            .copied()
            .unwrap_or(false);
        Some((desc, ready))
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new()
    }
}
