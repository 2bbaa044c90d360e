//! Referral handlers
//!
//! Registration is invoked by the onboarding flow before the referred user's
//! first wallet request; the credits query backs the referrer's dashboard.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::super::state::AppState;
use super::super::types::{ApiResponse, CreditsData, ReferralData, alloc_error_response};

/// User id in a JSON body: the bot sends numeric Telegram ids, the web
/// onboarding sends strings. Both normalize to string form.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RawUserId {
    String(String),
    Number(i64),
}

impl RawUserId {
    fn into_string(self) -> String {
        match self {
            RawUserId::String(s) => s,
            RawUserId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReferralRequest {
    pub referrer: RawUserId,
    pub referred: RawUserId,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CreditsQuery {
    pub user_id: String,
}

/// Record a referral edge (referrer -> referred)
///
/// Idempotent: repeats return `recorded = false`. Only the first edge for a
/// referred user counts (single-attribution policy).
#[utoipa::path(
    post,
    path = "/api/v1/referral",
    request_body = ReferralRequest,
    responses(
        (status = 200, description = "Edge recorded (or already present)", body = ReferralData),
        (status = 400, description = "Invalid user id or self-referral")
    ),
    tag = "Referral"
)]
pub async fn record_referral(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReferralRequest>,
) -> Result<Json<ApiResponse<ReferralData>>, (StatusCode, Json<ApiResponse<()>>)> {
    let referrer = req.referrer.into_string();
    let referred = req.referred.into_string();

    match state.allocator.record_referral(&referrer, &referred) {
        Ok(recorded) => Ok(Json(ApiResponse::success(ReferralData { recorded }))),
        Err(err) => {
            let (status, resp) = alloc_error_response(&err);
            Err((status, Json(resp)))
        }
    }
}

/// Accrued referral credits for a referrer
#[utoipa::path(
    get,
    path = "/api/v1/referral/credits",
    params(CreditsQuery),
    responses(
        (status = 200, description = "Credit totals", body = CreditsData),
        (status = 400, description = "Invalid user id")
    ),
    tag = "Referral"
)]
pub async fn get_referral_credits(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CreditsQuery>,
) -> Result<Json<ApiResponse<CreditsData>>, (StatusCode, Json<ApiResponse<()>>)> {
    let credits = state
        .allocator
        .credits(&query.user_id)
        .map_err(|err| {
            let (status, resp) = alloc_error_response(&err);
            (status, Json(resp))
        })?;
    let referred_count = state
        .allocator
        .referral_count(&query.user_id)
        .unwrap_or(0);

    Ok(Json(ApiResponse::success(CreditsData {
        credits,
        referred_count,
    })))
}
