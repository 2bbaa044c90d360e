//! API Response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `error_codes`: Standard error code constants
//! - `AllocError` -> HTTP status/code mapping

use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AllocError;

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Standard API error codes
pub mod error_codes {
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;

    // Resource errors (4xxx)
    pub const POOL_EXHAUSTED: i32 = 4001;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

/// Map an allocator failure to the transport's status/code pair.
///
/// `PoolExhausted` maps to 200: clients poll `{"wallet": null}` until an
/// address appears, so exhaustion is a well-formed answer, not a transport
/// failure. Handlers that want the 200-with-null-data shape handle it before
/// calling this.
pub fn alloc_error_response(err: &AllocError) -> (StatusCode, ApiResponse<()>) {
    match err {
        AllocError::PoolExhausted => (
            StatusCode::OK,
            ApiResponse::<()>::error(error_codes::POOL_EXHAUSTED, "exhausted"),
        ),
        AllocError::InvalidIdentity(msg) => (
            StatusCode::BAD_REQUEST,
            ApiResponse::<()>::error(error_codes::INVALID_PARAMETER, msg.clone()),
        ),
        AllocError::Unavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            ApiResponse::<()>::error(error_codes::SERVICE_UNAVAILABLE, "unavailable"),
        ),
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Wallet query response data
#[derive(Debug, Serialize, ToSchema)]
pub struct WalletData {
    /// Assigned wallet address; null when the pool is exhausted
    #[schema(example = "W1")]
    pub wallet: Option<String>,
    /// True exactly once, on the request that committed the assignment
    pub newly_assigned: bool,
}

/// Referral registration response data
#[derive(Debug, Serialize, ToSchema)]
pub struct ReferralData {
    /// True when this request recorded the edge (repeats are no-ops)
    pub recorded: bool,
}

/// Referral credit totals for one referrer
#[derive(Debug, Serialize, ToSchema)]
pub struct CreditsData {
    #[schema(example = 3)]
    pub credits: u64,
    /// Number of users this referrer has referred
    #[schema(example = 5)]
    pub referred_count: usize,
}

/// Pool observability data
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolData {
    pub remaining: usize,
    pub initial_size: usize,
    pub assigned: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success(WalletData {
            wallet: Some("W1".to_string()),
            newly_assigned: true,
        });
        assert_eq!(resp.code, error_codes::SUCCESS);
        assert_eq!(resp.msg, "ok");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"wallet\":\"W1\""));
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let resp = ApiResponse::<()>::error(error_codes::INVALID_PARAMETER, "empty user id");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("data"));
        assert!(json.contains("1001"));
    }

    #[test]
    fn test_exhaustion_maps_to_ok() {
        let (status, resp) = alloc_error_response(&AllocError::PoolExhausted);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.code, error_codes::POOL_EXHAUSTED);
        assert_eq!(resp.msg, "exhausted");
    }

    #[test]
    fn test_invalid_identity_maps_to_400() {
        let err = AllocError::InvalidIdentity("empty user id".to_string());
        let (status, resp) = alloc_error_response(&err);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.code, error_codes::INVALID_PARAMETER);
    }
}
