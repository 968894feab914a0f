use thiserror::Error;

/// Policy engine error taxonomy. All variants are local to the single event
/// being processed; a failing event never affects others in flight.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed input: bad date, non-numeric id, unknown feature. No state
    /// is mutated.
    #[error("{0}")]
    Validation(String),

    /// A non-admin, non-owner attempted a privileged action.
    #[error("{0}")]
    Authorization(String),

    /// Benign outcome: the record the caller wanted to remove was absent.
    #[error("{0}")]
    NotFound(String),

    /// Rejected before any mutation, e.g. warning the owner.
    #[error("{0}")]
    Policy(String),

    /// A store or chat-platform call failed. Surfaced with the underlying
    /// message, never retried, never rolled back.
    #[error("collaborator call failed: {0}")]
    Collaborator(#[source] anyhow::Error),
}
