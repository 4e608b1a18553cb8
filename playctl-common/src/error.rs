// ================================================================
// File: playctl-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The player rejected or failed to carry out a request.
    #[error("Player error: {0}")]
    Player(String),
}
