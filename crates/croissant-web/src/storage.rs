//! localStorage-backed persistence collaborator.
//!
//! Best-effort only: every failure path returns `None`/`false`, logs a
//! warning and lets the game continue. A failed load is "no prior state";
//! a failed save is "retry next time". Nothing here may block the loop.
//!
//! Versioning: `SAVE_VERSION` is the current format; `MIN_COMPATIBLE_VERSION`
//! is the oldest snapshot we still accept. Additive field changes keep the
//! minimum where it is (serde defaults cover missing fields); breaking
//! changes raise it and discard old saves.

#[cfg(any(target_arch = "wasm32", test))]
use croissant_engine::PlayerSnapshot;
#[cfg(any(target_arch = "wasm32", test))]
use serde::{Deserialize, Serialize};

#[cfg(any(target_arch = "wasm32", test))]
const SAVE_VERSION: u32 = 1;
#[cfg(any(target_arch = "wasm32", test))]
const MIN_COMPATIBLE_VERSION: u32 = 1;

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "croissant_adventure_save";

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    player: PlayerSnapshot,
}

#[cfg(any(target_arch = "wasm32", test))]
fn encode_save(snapshot: &PlayerSnapshot) -> Option<String> {
    let data = SaveData {
        version: SAVE_VERSION,
        player: snapshot.clone(),
    };
    match serde_json::to_string(&data) {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("save serialization failed: {}", e);
            None
        }
    }
}

#[cfg(any(target_arch = "wasm32", test))]
fn decode_save(json: &str) -> Option<PlayerSnapshot> {
    let data: SaveData = match serde_json::from_str(json) {
        Ok(d) => d,
        Err(e) => {
            log::warn!("save data rejected: {}", e);
            return None;
        }
    };
    if data.version < MIN_COMPATIBLE_VERSION {
        log::info!(
            "save version too old (saved={}, min={}); starting fresh",
            data.version,
            MIN_COMPATIBLE_VERSION
        );
        return None;
    }
    Some(data.player)
}

#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Load the player snapshot, or `None` when absent/unreadable.
#[cfg(target_arch = "wasm32")]
pub fn load_player_data() -> Option<PlayerSnapshot> {
    let storage = get_storage()?;
    let json = match storage.get_item(STORAGE_KEY) {
        Ok(Some(j)) => j,
        _ => return None,
    };
    let snapshot = decode_save(&json);
    if snapshot.is_none() {
        // Unreadable or incompatible: drop it so we don't re-log every boot.
        let _ = storage.remove_item(STORAGE_KEY);
    }
    snapshot
}

/// Persist the player snapshot. Returns whether the write succeeded.
#[cfg(target_arch = "wasm32")]
pub fn save_player_data(snapshot: &PlayerSnapshot) -> bool {
    let json = match encode_save(snapshot) {
        Some(j) => j,
        None => return false,
    };
    match get_storage() {
        Some(storage) => match storage.set_item(STORAGE_KEY, &json) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("localStorage write failed: {:?}", e);
                false
            }
        },
        None => false,
    }
}

/// Delete the stored snapshot.
#[cfg(target_arch = "wasm32")]
pub fn delete_save() {
    if let Some(storage) = get_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croissant_engine::{source, PlayerProgress};

    #[test]
    fn encode_decode_round_trip() {
        let mut progress = PlayerProgress::new();
        progress.add_points(10, source::COIN);
        progress.add_points(250, source::SHOOTER);
        progress.add_points(150, source::MAZE);
        let snapshot = progress.snapshot();

        let json = encode_save(&snapshot).unwrap();
        let restored = decode_save(&json).unwrap();
        assert_eq!(restored, snapshot);
        assert_eq!(restored.achievements.shooter_highscore, 250);
        assert!(restored.achievements.maze_completed);
    }

    #[test]
    fn garbage_json_is_rejected() {
        assert!(decode_save("definitely not json").is_none());
    }

    #[test]
    fn incompatible_version_is_rejected() {
        let json = r#"{"version":0,"player":{}}"#;
        assert!(decode_save(json).is_none());
    }

    #[test]
    fn missing_fields_use_defaults() {
        // Additive evolution: a snapshot missing newer fields still loads.
        let json = r#"{"version":1,"player":{"score":42}}"#;
        let snapshot = decode_save(json).unwrap();
        assert_eq!(snapshot.score, 42);
        assert_eq!(snapshot.coins, 0);
        assert!(!snapshot.parental_control);
    }
}
