//! Error types for larder.

use miette::Diagnostic;
use thiserror::Error;

/// Error type for repository operations.
///
/// Absence is not an error: a single-item fetch that matches zero rows
/// returns `Ok(None)` from [`crate::Repository::get_single`].
#[derive(Error, Diagnostic, Debug)]
pub enum LarderError {
    #[error("Session could not be opened: {0}")]
    #[diagnostic(
        code(larder::session),
        help("Check that the database file exists and is writable")
    )]
    Session(String),

    #[error("Store operation failed: {0}")]
    #[diagnostic(
        code(larder::store),
        help("The statement reached the store and was rejected; inspect the underlying error")
    )]
    Store(#[from] rusqlite::Error),

    #[error("Query composition failed: {0}")]
    #[diagnostic(
        code(larder::composition),
        help("The operation was rejected before any statement reached the store")
    )]
    Composition(String),
}

/// Result type alias for repository operations.
pub type Result<T> = std::result::Result<T, LarderError>;
