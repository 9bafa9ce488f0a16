//! Fire-and-forget sync notifications.

/// Events emitted on the optional notification channel.
///
/// Intermediate progress is not part of the contract; listeners get a
/// start signal and one terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A sync pass has begun
    Started,

    /// The pass completed, possibly with partial failures
    Completed {
        /// Tracks added or updated in this pass
        added: usize,
        /// Artists in the library after reconciliation
        artists: usize,
        /// Albums in the library after reconciliation
        albums: usize,
    },

    /// The pass aborted on validation or a fatal storage failure
    Failed {
        /// Human-readable failure reason
        message: String,
    },
}
