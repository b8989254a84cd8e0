//! Entity directory errors.

use std::path::PathBuf;
use thiserror::Error;

/// Entity loading and lookup errors
#[derive(Debug, Error)]
pub enum EntitiesError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` is not a valid entities file")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("no entity directory provider is mounted")]
    NoProvider,
}
