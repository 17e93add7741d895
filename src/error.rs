//! Error types surfaced to the host UI.
//!
//! Nothing in this engine is fatal: every failure degrades to "show the
//! last good state and keep accepting input". Only the render coordinator
//! produces user-visible error text, and only for the two kinds below.
//! Stale responses are dropped silently and mapping misses simply clear
//! the highlight.

use thiserror::Error;

use crate::model::RequestGeneration;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The renderer rejected the submitted content. Recoverable: the
    /// coordinator rolls back to the last valid render and editing stays
    /// enabled.
    #[error("Score rendering failed: {message}")]
    ParseFailure {
        generation: RequestGeneration,
        message: String,
    },

    /// A render request exceeded its deadline without resolving. Advisory
    /// only; the renderer may still resolve later and no rollback happens.
    #[error("Score rendering is taking unusually long; the source may be invalid")]
    ParseTimeout { generation: RequestGeneration },
}

impl SyncError {
    /// The request generation this error belongs to.
    pub fn generation(&self) -> RequestGeneration {
        match self {
            SyncError::ParseFailure { generation, .. } => *generation,
            SyncError::ParseTimeout { generation } => *generation,
        }
    }
}
