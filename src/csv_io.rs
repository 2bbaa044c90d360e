//! CSV I/O - Load the wallet pool fixture
//!
//! The pool is an ordered sequence of distinct wallet addresses, loaded once
//! at process start. File order is draw order.

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::core_types::WalletAddress;

pub const WALLETS_CONFIG_CSV: &str = "fixtures/wallets.csv";

/// Load the ordered wallet list from a CSV file.
///
/// Format: header line `address`, then one address per line. Blank lines and
/// `#` comments are skipped. Duplicate addresses are a configuration error.
pub fn load_wallet_pool(path: &str) -> Result<Vec<WalletAddress>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
    let reader = BufReader::new(file);

    let mut addresses: Vec<WalletAddress> = Vec::new();
    let mut seen: FxHashSet<WalletAddress> = FxHashSet::default();

    for (line_num, line) in reader.lines().skip(1).enumerate() {
        let line =
            line.with_context(|| format!("Failed to read {} line {}", path, line_num + 2))?;
        let addr = line.trim();
        if addr.is_empty() || addr.starts_with('#') {
            continue;
        }
        if !seen.insert(addr.to_string()) {
            bail!(
                "Duplicate wallet address at {} line {}: {}",
                path,
                line_num + 2,
                addr
            );
        }
        addresses.push(addr.to_string());
    }

    tracing::info!(path, count = addresses.len(), "wallet pool loaded");
    Ok(addresses)
}
