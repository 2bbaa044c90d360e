//! Core types used throughout the system
//!
//! These are fundamental type aliases used by all modules.
//! They provide semantic meaning and enable future type evolution.

/// User ID - opaque, unique key for a requesting user.
///
/// # Constraints:
/// - **Normalized**: Inbound ids (numeric or string) are trimmed to string form
///   before touching any ledger
/// - **Immutable**: Never changes once first seen, never deleted
pub type UserId = String;

/// Wallet address - an opaque allocatable token drawn from a finite pool.
///
/// Immutable once loaded. Exactly two states: available (in the pool) or
/// assigned (bound to exactly one user, permanently).
pub type WalletAddress = String;

/// Referral credit total, in fixed units.
pub type CreditUnits = u64;

/// Credit granted to a referrer per referred user's first assignment.
pub const CREDIT_PER_REFERRAL: CreditUnits = 1;

/// Maximum accepted length of a user id after trimming.
pub const MAX_USER_ID_LEN: usize = 64;
