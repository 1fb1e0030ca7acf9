//! Error types for tpms-core

use thiserror::Error;

/// Result type alias using this crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or meshing a voxel field
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or contradictory configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The scalar field never crosses the zero level set
    #[error("No iso-surface found: the field does not cross zero anywhere")]
    NoSurface,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
