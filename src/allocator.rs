//! Allocator - the service facade over pool, assignments and referrals
//!
//! Owns all three ledgers. Constructed once at startup and passed into the
//! transport adapters (HTTP today, chat-bot tomorrow); nothing reaches the
//! ledgers except through it.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::assignments::{Assignment, AssignmentLedger};
use crate::core_types::{CreditUnits, MAX_USER_ID_LEN, UserId, WalletAddress};
use crate::error::AllocError;
use crate::notify::{Notification, NotifySender};
use crate::pool::WalletPool;
use crate::referrals::ReferralLedger;

/// Result of a wallet request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletGrant {
    pub wallet: WalletAddress,
    /// `true` exactly once per user, on the request that committed the binding.
    pub newly_assigned: bool,
}

/// Normalize an inbound user id (numeric or string) to ledger key form.
///
/// Rejected ids never touch the ledgers.
pub fn normalize_user_id(raw: &str) -> Result<UserId, AllocError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AllocError::InvalidIdentity("empty user id".to_string()));
    }
    if trimmed.len() > MAX_USER_ID_LEN {
        return Err(AllocError::InvalidIdentity(format!(
            "user id longer than {} bytes",
            MAX_USER_ID_LEN
        )));
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err(AllocError::InvalidIdentity(
            "user id contains control characters".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

pub struct WalletAllocator {
    pool: WalletPool,
    assignments: AssignmentLedger,
    referrals: ReferralLedger,
    notify: NotifySender,
    /// Guards the one-shot exhaustion alert.
    exhaustion_alerted: AtomicBool,
}

impl WalletAllocator {
    pub fn new(pool: WalletPool, notify: NotifySender) -> Self {
        Self {
            pool,
            assignments: AssignmentLedger::new(),
            referrals: ReferralLedger::new(),
            notify,
            exhaustion_alerted: AtomicBool::new(false),
        }
    }

    /// Request a wallet for `raw_id`.
    ///
    /// Repeat requests by an assigned user return the committed wallet with
    /// `newly_assigned = false` and never draw again. On the newly-assigned
    /// transition (and only then) referral credit accrues and a notification
    /// fires.
    pub fn request_wallet(&self, raw_id: &str) -> Result<WalletGrant, AllocError> {
        let user_id = normalize_user_id(raw_id)?;

        let Some((assignment, newly_assigned)) =
            self.assignments.get_or_assign(&user_id, &self.pool)
        else {
            tracing::info!(user_id, "wallet request rejected: pool exhausted");
            self.alert_exhaustion_once();
            return Err(AllocError::PoolExhausted);
        };

        if newly_assigned {
            tracing::info!(
                user_id,
                wallet = assignment.wallet,
                remaining = self.pool.remaining(),
                "wallet assigned"
            );
            self.settle_referral(&user_id, &assignment);
            if self.pool.is_exhausted() {
                self.alert_exhaustion_once();
            }
        }

        Ok(WalletGrant {
            wallet: assignment.wallet,
            newly_assigned,
        })
    }

    /// Record a referral edge. Both ids are normalized first; self-referral
    /// is rejected. Returns `true` only when this call recorded the edge
    /// (repeats and competing edges are no-ops, see [`ReferralLedger`]).
    pub fn record_referral(&self, referrer: &str, referred: &str) -> Result<bool, AllocError> {
        let referrer = normalize_user_id(referrer)?;
        let referred = normalize_user_id(referred)?;
        if referrer == referred {
            return Err(AllocError::InvalidIdentity(
                "self-referral is not allowed".to_string(),
            ));
        }
        let recorded = self.referrals.record(&referrer, &referred);
        if recorded {
            tracing::info!(referrer, referred, "referral edge recorded");
        }
        Ok(recorded)
    }

    /// Committed assignment lookup, no side effects.
    pub fn lookup(&self, raw_id: &str) -> Result<Option<Assignment>, AllocError> {
        let user_id = normalize_user_id(raw_id)?;
        Ok(self.assignments.get(&user_id))
    }

    pub fn credits(&self, raw_id: &str) -> Result<CreditUnits, AllocError> {
        let user_id = normalize_user_id(raw_id)?;
        Ok(self.referrals.credits(&user_id))
    }

    pub fn referral_count(&self, raw_id: &str) -> Result<usize, AllocError> {
        let user_id = normalize_user_id(raw_id)?;
        Ok(self.referrals.referral_count(&user_id))
    }

    pub fn pool(&self) -> &WalletPool {
        &self.pool
    }

    pub fn assigned_count(&self) -> usize {
        self.assignments.len()
    }

    fn settle_referral(&self, user_id: &UserId, assignment: &Assignment) {
        if let Some(event) = self.referrals.credit_on_first_assignment(user_id) {
            tracing::info!(
                referrer = event.referrer,
                referred = event.referred,
                total_credits = event.total_credits,
                "referral credit accrued"
            );
            // Fire-and-forget: a dropped sink must not affect the request
            let _ = self.notify.send(Notification::ReferralCredited {
                referrer: event.referrer,
                referred: event.referred,
                wallet: assignment.wallet.clone(),
            });
        }
    }

    fn alert_exhaustion_once(&self) {
        if !self.exhaustion_alerted.swap(true, Ordering::AcqRel) {
            let _ = self.notify.send(Notification::PoolExhausted {
                pool_size: self.pool.initial_size(),
            });
        }
    }
}
