pub mod health;
pub mod referral;
pub mod wallet;

pub use health::{HealthResponse, get_pool_stats, health_check};
pub use referral::{get_referral_credits, record_referral};
pub use wallet::get_wallet;
