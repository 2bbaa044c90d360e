//! Wallet pool - the single source of "what is still available"
//!
//! Holds the ordered, finite set of unassigned wallet addresses loaded once at
//! startup. The pool only shrinks: a drawn address never returns.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core_types::WalletAddress;

/// FIFO pool of unassigned wallet addresses.
///
/// `draw` pops the head under a mutex, so two concurrent draws can never
/// observe the same address. `remaining` is kept in a separate atomic so
/// observability reads never contend with draws.
pub struct WalletPool {
    available: Mutex<VecDeque<WalletAddress>>,
    remaining: AtomicUsize,
    initial_size: usize,
}

impl WalletPool {
    /// Create a pool from an ordered list of distinct addresses.
    ///
    /// Insertion order is the draw order (pop-first-available policy).
    pub fn new(addresses: Vec<WalletAddress>) -> Self {
        let initial_size = addresses.len();
        Self {
            available: Mutex::new(VecDeque::from(addresses)),
            remaining: AtomicUsize::new(initial_size),
            initial_size,
        }
    }

    /// Remove and return the pool's head address.
    ///
    /// Returns `None` when the pool is empty - a legitimate terminal state,
    /// not an error.
    pub fn draw(&self) -> Option<WalletAddress> {
        let mut available = self.available.lock().expect("wallet pool mutex poisoned");
        let addr = available.pop_front()?;
        self.remaining.store(available.len(), Ordering::Release);
        Some(addr)
    }

    /// Number of addresses still available.
    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    /// Pool size at initialization. Fixed for the process lifetime.
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn pool_of(n: usize) -> WalletPool {
        WalletPool::new((0..n).map(|i| format!("W{}", i)).collect())
    }

    #[test]
    fn test_draw_fifo_order() {
        let pool = WalletPool::new(vec!["W1".into(), "W2".into(), "W3".into()]);
        assert_eq!(pool.draw().as_deref(), Some("W1"));
        assert_eq!(pool.draw().as_deref(), Some("W2"));
        assert_eq!(pool.draw().as_deref(), Some("W3"));
        assert_eq!(pool.draw(), None);
    }

    #[test]
    fn test_remaining_tracks_draws() {
        let pool = pool_of(3);
        assert_eq!(pool.remaining(), 3);
        assert_eq!(pool.initial_size(), 3);
        pool.draw();
        assert_eq!(pool.remaining(), 2);
        pool.draw();
        pool.draw();
        assert_eq!(pool.remaining(), 0);
        assert!(pool.is_exhausted());
        // Exhaustion is terminal
        assert_eq!(pool.draw(), None);
        assert_eq!(pool.initial_size(), 3);
    }

    #[test]
    fn test_empty_pool() {
        let pool = WalletPool::new(vec![]);
        assert!(pool.is_exhausted());
        assert_eq!(pool.draw(), None);
    }

    #[test]
    fn test_concurrent_draws_are_distinct() {
        let pool = Arc::new(pool_of(100));

        let mut handles = vec![];
        for _ in 0..10 {
            let pool = Arc::clone(&pool);
            handles.push(thread::spawn(move || {
                let mut drawn = vec![];
                for _ in 0..10 {
                    if let Some(addr) = pool.draw() {
                        drawn.push(addr);
                    }
                }
                drawn
            }));
        }

        let mut all: Vec<String> = vec![];
        for handle in handles {
            all.extend(handle.join().unwrap());
        }

        // 100 draws against a pool of 100: no duplicates, no lost draws
        assert_eq!(all.len(), 100);
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), 100);
        assert!(pool.is_exhausted());
    }
}
