//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and shutdown so
//! `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: beyond_core::ConfigError,
    },

    /// Reference data failed validation.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: beyond_world::WorldError,
    },

    /// Opening, reading, or saving the store failed.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: beyond_db::DbError,
    },

    /// Explorer seeding failed.
    #[error("spawner error: {message}")]
    Spawner {
        /// Description of the spawner failure.
        message: String,
    },
}

impl From<beyond_core::CommandError> for EngineError {
    fn from(err: beyond_core::CommandError) -> Self {
        Self::Spawner {
            message: err.to_string(),
        }
    }
}
