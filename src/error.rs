use thiserror::Error;

/// Failure taxonomy for wallet allocation.
///
/// A repeat query by an already-assigned user is NOT an error: it returns the
/// committed assignment with `newly_assigned = false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    /// No wallets remain in the pool. Terminal unless the pool is externally
    /// replenished; callers surface "no capacity" and must not auto-retry.
    #[error("wallet pool exhausted")]
    PoolExhausted,

    #[error("invalid user id: {0}")]
    InvalidIdentity(String),

    /// Backing-store failure. The in-memory ledgers never produce this; it is
    /// the mapping point for a persistent backend, and is guaranteed to leave
    /// pool and ledger unmutated.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}
