//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::gateway::handlers::referral::{RawUserId, ReferralRequest};
use crate::gateway::types::{CreditsData, PoolData, ReferralData, WalletData};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Walletd Allocation API",
        version = "1.0.0",
        description = "Allocates one pre-generated wallet per user and tracks referral credits."
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::health::get_pool_stats,
        crate::gateway::handlers::wallet::get_wallet,
        crate::gateway::handlers::referral::record_referral,
        crate::gateway::handlers::referral::get_referral_credits,
    ),
    components(
        schemas(
            HealthResponse,
            WalletData,
            ReferralData,
            ReferralRequest,
            RawUserId,
            CreditsData,
            PoolData,
        )
    ),
    tags(
        (name = "Wallet", description = "Wallet assignment queries"),
        (name = "Referral", description = "Referral registration and credit totals"),
        (name = "System", description = "Health checks and pool counters")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Walletd Allocation API");
        assert_eq!(spec.info.version, "1.0.0");
    }

    #[test]
    fn test_endpoints_registered() {
        let spec = ApiDoc::openapi();
        let paths = spec.paths.paths;
        assert!(paths.contains_key("/api/v1/wallet"));
        assert!(paths.contains_key("/api/v1/referral"));
        assert!(paths.contains_key("/api/v1/referral/credits"));
        assert!(paths.contains_key("/api/v1/pool"));
        assert!(paths.contains_key("/api/v1/health"));
    }
}
