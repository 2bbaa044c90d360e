//! Referral ledger - referral edges and credit accrual
//!
//! Attribution policy: the FIRST edge recorded for a referred user wins and
//! later edges for the same user are ignored. Single attribution is a
//! deliberate business rule, not a bug; multi-referrer splits are not
//! supported.

use dashmap::{DashMap, DashSet};
use rustc_hash::FxHashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core_types::{CREDIT_PER_REFERRAL, CreditUnits, UserId};

/// Credit event produced by a referred user's first successful assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditEvent {
    pub referrer: UserId,
    pub referred: UserId,
    pub total_credits: CreditUnits,
}

/// Thread-safe referral edge store plus accrued-credit totals.
pub struct ReferralLedger {
    /// referred -> referrer. Write-once: the first recorded edge wins.
    referred_by: DashMap<UserId, UserId>,
    /// referrer -> set of referred users.
    referred_sets: DashMap<UserId, FxHashSet<UserId>>,
    /// referrer -> accrued credit total.
    credits: DashMap<UserId, AtomicU64>,
    /// Referred users whose credit event has already fired.
    credited: DashSet<UserId>,
}

impl ReferralLedger {
    pub fn new() -> Self {
        Self {
            referred_by: DashMap::new(),
            referred_sets: DashMap::new(),
            credits: DashMap::new(),
            credited: DashSet::new(),
        }
    }

    /// Record a referral edge (referrer -> referred).
    ///
    /// Idempotent: repeats and competing edges for an already-referred user
    /// are no-ops. Returns `true` only when this call recorded the edge.
    pub fn record(&self, referrer: &UserId, referred: &UserId) -> bool {
        use dashmap::mapref::entry::Entry;

        match self.referred_by.entry(referred.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(referrer.clone());
                self.referred_sets
                    .entry(referrer.clone())
                    .or_default()
                    .insert(referred.clone());
                true
            }
        }
    }

    /// Accrue the referrer's credit for a referred user's first assignment.
    ///
    /// Called by the orchestrator only on the newly-assigned transition. The
    /// `credited` guard makes the increment idempotent per referred user even
    /// under orchestrator retries: at most one credit event fires over the
    /// referred user's lifetime.
    pub fn credit_on_first_assignment(&self, referred: &UserId) -> Option<CreditEvent> {
        let referrer = self.referred_by.get(referred)?.clone();

        if !self.credited.insert(referred.clone()) {
            return None; // already credited
        }

        let total = self
            .credits
            .entry(referrer.clone())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(CREDIT_PER_REFERRAL, Ordering::AcqRel)
            + CREDIT_PER_REFERRAL;

        Some(CreditEvent {
            referrer,
            referred: referred.clone(),
            total_credits: total,
        })
    }

    /// Accrued credit total for a referrer. Zero if never credited.
    pub fn credits(&self, referrer: &str) -> CreditUnits {
        self.credits
            .get(referrer)
            .map(|c| c.load(Ordering::Acquire))
            .unwrap_or(0)
    }

    /// Who referred this user, if anyone.
    pub fn referred_by(&self, user_id: &str) -> Option<UserId> {
        self.referred_by.get(user_id).map(|e| e.clone())
    }

    /// Number of users this referrer has referred.
    pub fn referral_count(&self, referrer: &str) -> usize {
        self.referred_sets
            .get(referrer)
            .map(|s| s.len())
            .unwrap_or(0)
    }
}

impl Default for ReferralLedger {
    fn default() -> Self {
        Self::new()
    }
}
