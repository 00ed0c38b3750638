//! Shared application error types

use crate::infrastructure::project::LoaderError;
use crate::infrastructure::registry::RegistryError;

/// Errors surfaced by scan orchestration.
///
/// The analysis core itself has no failure taxonomy: missing or partial input
/// degrades to "no finding". These variants cover the boundaries around it.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("project loading failed: {0}")]
    Loader(#[from] LoaderError),

    #[error("registry client error: {0}")]
    Registry(#[from] RegistryError),

    #[error("report serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
