use std::path::PathBuf;

use crate::types::WindowId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("geometry unavailable: {0}")]
    GeometryUnavailable(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

#[derive(Debug, thiserror::Error)]
pub enum MediumError {
    #[error("medium read error: {0}")]
    ReadError(String),

    #[error("medium write error: {0}")]
    WriteError(String),

    #[error("medium watch error: {0}")]
    WatchError(String),

    #[error("medium lock poisoned")]
    Poisoned,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A self-scoped operation ran before `init` or after departure.
    #[error("{0} requires a joined window")]
    NotJoined(&'static str),

    #[error("already joined as {0}")]
    AlreadyJoined(WindowId),

    #[error("{0} is missing from the cached snapshot")]
    SelfNotFound(WindowId),

    #[error("snapshot encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Medium(#[from] MediumError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

#[derive(Debug, thiserror::Error)]
pub enum WinsyncError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Medium(#[from] MediumError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
