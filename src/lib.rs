//! Walletd - Wallet Allocation Service
//!
//! Hands out pre-generated wallet addresses to users, one each, forever,
//! and credits referrers when their referred users get their first wallet.
//!
//! # Modules
//!
//! - [`core_types`] - Core type definitions (UserId, WalletAddress, ...)
//! - [`pool`] - Finite FIFO pool of unassigned addresses
//! - [`assignments`] - Write-once user -> wallet ledger (the atomic draw+bind)
//! - [`referrals`] - Referral edges and credit accrual
//! - [`allocator`] - Service facade sequencing the three ledgers
//! - [`notify`] - Fire-and-forget notification events
//! - [`csv_io`] - Wallet pool fixture loading
//! - [`gateway`] - Axum HTTP transport adapter

// Core types - must be first!
pub mod core_types;

// Allocation core
pub mod allocator;
pub mod assignments;
pub mod error;
pub mod notify;
pub mod pool;
pub mod referrals;

// Ambient
pub mod config;
pub mod csv_io;
pub mod gateway;
pub mod logging;

// Convenient re-exports at crate root
pub use allocator::{WalletAllocator, WalletGrant, normalize_user_id};
pub use assignments::{Assignment, AssignmentLedger};
pub use core_types::{CREDIT_PER_REFERRAL, CreditUnits, UserId, WalletAddress};
pub use error::AllocError;
pub use notify::{Notification, NotifyReceiver, NotifySender, notify_channel, run_notifier};
pub use pool::WalletPool;
pub use referrals::{CreditEvent, ReferralLedger};
