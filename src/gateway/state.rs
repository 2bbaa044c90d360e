use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::allocator::WalletAllocator;

/// Gateway shared state.
///
/// The allocator is the only mutable surface; the transport layer never
/// reaches the ledgers directly.
#[derive(Clone)]
pub struct AppState {
    pub allocator: Arc<WalletAllocator>,
    /// Process start, for health reporting.
    pub started_at_ms: u64,
}

impl AppState {
    pub fn new(allocator: Arc<WalletAllocator>) -> Self {
        Self {
            allocator,
            started_at_ms: now_ms(),
        }
    }
}

/// Current wall-clock time in milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
