use thiserror::Error;

/// Errors surfaced by the engine. Scene construction failures are values so
/// that one broken minigame cannot abort startup of the rest.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("scene construction failed: {0}")]
    SceneConstruction(String),

    #[error("no scenes registered")]
    EmptyStage,

    #[error("invalid asset manifest: {0}")]
    Manifest(String),
}
