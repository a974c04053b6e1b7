use thiserror::Error;

/// Errors that can occur while decoding artwork supplied by the persistence
/// layer. The live engine itself never fails: invariant violations are
/// reported as `bool`/`Option` no-ops, so only the restore boundary carries
/// a `Result`.
#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error("malformed path description: {0}")]
    PathParse(String),

    #[error("failed to decode artwork: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid artwork: {0}")]
    InvalidArtwork(String),
}

/// Result type for artwork decode operations.
pub type ArtworkResult<T> = Result<T, ArtworkError>;
