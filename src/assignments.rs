//! Assignment ledger - the write-once user -> wallet binding
//!
//! Checking membership and popping the pool as two separate steps is a
//! textbook lost-update race: two concurrent first requests for the same user
//! could both pass the miss-check and each draw a wallet. Here the miss-check,
//! the draw and the bind are one compound operation under the ledger's
//! per-shard entry lock, so requests for the same new user serialize while
//! requests for distinct users proceed independently.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;

use crate::core_types::{UserId, WalletAddress};
use crate::pool::WalletPool;

/// The permanent binding of one user to one wallet.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub wallet: WalletAddress,
    pub assigned_at: DateTime<Utc>,
}

/// Thread-safe write-once mapping from user to assignment.
///
/// Entries are never removed or overwritten. Reads of committed entries are
/// wait-free relative to assignments of other users.
pub struct AssignmentLedger {
    assignments: DashMap<UserId, Assignment>,
}

impl AssignmentLedger {
    pub fn new() -> Self {
        Self {
            assignments: DashMap::new(),
        }
    }

    /// Look up a committed assignment without touching the pool.
    pub fn get(&self, user_id: &str) -> Option<Assignment> {
        self.assignments.get(user_id).map(|e| e.clone())
    }

    /// Return the user's assignment, drawing and binding a fresh wallet on
    /// first contact.
    ///
    /// Returns `(assignment, newly_assigned)`; `newly_assigned` is `true`
    /// exactly once per user, on the request that committed the binding.
    /// Returns `None` only when the user is unassigned AND the pool is
    /// exhausted; in that case neither pool nor ledger is mutated and a later
    /// retry may succeed.
    ///
    /// # Atomicity
    /// The vacant-entry lock is held across draw + insert, so the check and
    /// the act are a single unit: concurrent first requests for one user
    /// yield one draw, and a wallet is never drawn without being bound.
    pub fn get_or_assign(
        &self,
        user_id: &UserId,
        pool: &WalletPool,
    ) -> Option<(Assignment, bool)> {
        match self.assignments.entry(user_id.clone()) {
            Entry::Occupied(entry) => Some((entry.get().clone(), false)),
            Entry::Vacant(entry) => {
                let wallet = pool.draw()?;
                let assignment = Assignment {
                    wallet,
                    assigned_at: Utc::now(),
                };
                entry.insert(assignment.clone());
                Some((assignment, true))
            }
        }
    }

    /// Number of committed assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl Default for AssignmentLedger {
    fn default() -> Self {
        Self::new()
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
    fn test_first_assignment_draws_head() {
        let ledger = AssignmentLedger::new();
        let pool = pool_of(2);

        let (a, newly) = ledger.get_or_assign(&"u1".to_string(), &pool).unwrap();
        assert_eq!(a.wallet, "W0");
        assert!(newly);
        assert_eq!(pool.remaining(), 1);
    }

    #[test]
    fn test_repeat_request_is_stable() {
        let ledger = AssignmentLedger::new();
        let pool = pool_of(2);

        let (first, _) = ledger.get_or_assign(&"u1".to_string(), &pool).unwrap();
        let (second, newly) = ledger.get_or_assign(&"u1".to_string(), &pool).unwrap();

        assert_eq!(first.wallet, second.wallet);
        assert!(!newly);
        // Pool shrank exactly once across both calls
        assert_eq!(pool.remaining(), 1);
        assert_eq!(ledger.get("u1").unwrap().wallet, first.wallet);
    }

    #[test]
    fn test_exhaustion_leaves_user_unassigned() {
        let ledger = AssignmentLedger::new();
        let pool = pool_of(1);

        ledger.get_or_assign(&"u1".to_string(), &pool).unwrap();
        assert!(ledger.get_or_assign(&"u2".to_string(), &pool).is_none());

        // All-or-nothing: no partial binding for u2
        assert!(ledger.get("u2").is_none());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_assigned_user_survives_exhaustion() {
        let ledger = AssignmentLedger::new();
        let pool = pool_of(1);

        let (a, _) = ledger.get_or_assign(&"u1".to_string(), &pool).unwrap();
        // Pool now dry, but u1's committed binding is still served
        let (again, newly) = ledger.get_or_assign(&"u1".to_string(), &pool).unwrap();
        assert_eq!(a.wallet, again.wallet);
        assert!(!newly);
    }

    #[test]
    fn test_concurrent_same_user_single_draw() {
        let ledger = Arc::new(AssignmentLedger::new());
        let pool = Arc::new(pool_of(10));

        let mut handles = vec![];
        for _ in 0..8 {
            let ledger = Arc::clone(&ledger);
            let pool = Arc::clone(&pool);
            handles.push(thread::spawn(move || {
                ledger.get_or_assign(&"u1".to_string(), &pool).unwrap()
            }));
        }

        let results: Vec<(Assignment, bool)> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Exactly one winner of the newly-assigned transition
        let newly_count = results.iter().filter(|(_, newly)| *newly).count();
        assert_eq!(newly_count, 1);

        // Everyone observed the same wallet, and only one was drawn
        let wallets: HashSet<_> = results.iter().map(|(a, _)| a.wallet.clone()).collect();
        assert_eq!(wallets.len(), 1);
        assert_eq!(pool.remaining(), 9);
    }

    #[test]
    fn test_concurrent_distinct_users_distinct_wallets() {
        let ledger = Arc::new(AssignmentLedger::new());
        let pool = Arc::new(pool_of(100));

        let mut handles = vec![];
        for i in 0..100 {
            let ledger = Arc::clone(&ledger);
            let pool = Arc::clone(&pool);
            handles.push(thread::spawn(move || {
                let (a, newly) = ledger.get_or_assign(&format!("u{}", i), &pool).unwrap();
                assert!(newly);
                a.wallet
            }));
        }

        let wallets: HashSet<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // 100 first-timers against a pool of 100: zero duplicates, zero lost draws
        assert_eq!(wallets.len(), 100);
        assert!(pool.is_exhausted());
        assert_eq!(ledger.len(), 100);
    }
}
