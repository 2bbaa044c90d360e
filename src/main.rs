//! Walletd - Wallet Allocation Service
//!
//! Entry point. Wiring:
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌────────────┐    ┌──────────┐
//! │  Config  │───▶│ WalletPool│───▶│ Allocator  │───▶│ Gateway  │
//! │  (YAML)  │    │   (CSV)   │    │ (3 ledgers)│    │  (axum)  │
//! └──────────┘    └───────────┘    └────────────┘    └──────────┘
//! ```
//!
//! The allocator is built once here and passed down; nothing reaches the
//! ledgers through globals.

use std::sync::Arc;

use walletd::allocator::WalletAllocator;
use walletd::config::AppConfig;
use walletd::csv_io::load_wallet_pool;
use walletd::logging::init_logging;
use walletd::notify::{notify_channel, run_notifier};
use walletd::pool::WalletPool;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _log_guard = init_logging(&config);

    let addresses = load_wallet_pool(&config.pool.wallets_csv)?;
    if addresses.is_empty() {
        tracing::warn!("wallet pool fixture is empty; every request will see exhaustion");
    }
    let pool = WalletPool::new(addresses);
    println!("💳 Wallet pool loaded: {} addresses", pool.initial_size());

    let (notify_tx, notify_rx) = notify_channel();
    tokio::spawn(run_notifier(notify_rx));

    let allocator = Arc::new(WalletAllocator::new(pool, notify_tx));

    walletd::gateway::run_server(&config.gateway.host, config.gateway.port, allocator).await;
    Ok(())
}
