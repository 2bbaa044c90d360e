//! Notification sink - fire-and-forget operator/bot events
//!
//! The core emits events over an unbounded channel and never waits on or
//! observes delivery. A background task drains the channel and logs; a chat
//! transport can subscribe the same way.

use serde::Serialize;
use tokio::sync::mpsc;

use crate::core_types::{UserId, WalletAddress};

/// One-way events emitted by the allocator.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// A referred user got their first wallet and the referrer was credited.
    ReferralCredited {
        referrer: UserId,
        referred: UserId,
        wallet: WalletAddress,
    },
    /// The pool just served its last wallet. Fired once, for operator alerting.
    PoolExhausted { pool_size: usize },
}

pub type NotifySender = mpsc::UnboundedSender<Notification>;
pub type NotifyReceiver = mpsc::UnboundedReceiver<Notification>;

pub fn notify_channel() -> (NotifySender, NotifyReceiver) {
    mpsc::unbounded_channel()
}

/// Drain notifications and log them. Runs until all senders drop.
pub async fn run_notifier(mut rx: NotifyReceiver) {
    while let Some(event) = rx.recv().await {
        match event {
            Notification::ReferralCredited {
                referrer,
                referred,
                wallet,
            } => {
                tracing::info!(referrer, referred, wallet, "referral credited");
            }
            Notification::PoolExhausted { pool_size } => {
                tracing::warn!(pool_size, "wallet pool exhausted");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_and_forget_after_receiver_drop() {
        let (tx, rx) = notify_channel();
        drop(rx);
        // Emission must not panic or block once the sink is gone
        let _ = tx.send(Notification::PoolExhausted { pool_size: 10 });
    }

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let (tx, mut rx) = notify_channel();
        tx.send(Notification::ReferralCredited {
            referrer: "r1".into(),
            referred: "u9".into(),
            wallet: "W1".into(),
        })
        .unwrap();
        tx.send(Notification::PoolExhausted { pool_size: 2 }).unwrap();

        match rx.recv().await.unwrap() {
            Notification::ReferralCredited { referrer, .. } => assert_eq!(referrer, "r1"),
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(
            rx.recv().await.unwrap(),
            Notification::PoolExhausted { pool_size: 2 }
        );
    }
}
