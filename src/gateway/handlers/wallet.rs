//! Wallet query handler
//!
//! `GET /api/v1/wallet?user_id=U` is the boundary both the dashboard poller
//! and the chat-bot command handler consume: success returns the assigned
//! address, exhaustion returns a well-formed null wallet so pollers keep
//! their simple "null means ask again later" loop.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::super::state::AppState;
use super::super::types::{ApiResponse, WalletData, alloc_error_response, error_codes};
use crate::error::AllocError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct WalletQuery {
    /// Requesting user id (numeric ids arrive as their string form)
    pub user_id: String,
}

/// Request (or re-fetch) the user's wallet
///
/// First call draws the next available address and binds it permanently;
/// every later call returns the same address with `newly_assigned = false`.
#[utoipa::path(
    get,
    path = "/api/v1/wallet",
    params(WalletQuery),
    responses(
        (status = 200, description = "Wallet assigned or already bound; null wallet when pool is exhausted", body = WalletData),
        (status = 400, description = "Invalid user id")
    ),
    tag = "Wallet"
)]
pub async fn get_wallet(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WalletQuery>,
) -> Result<(StatusCode, Json<ApiResponse<WalletData>>), (StatusCode, Json<ApiResponse<()>>)> {
    match state.allocator.request_wallet(&query.user_id) {
        Ok(grant) => Ok((
            StatusCode::OK,
            Json(ApiResponse::success(WalletData {
                wallet: Some(grant.wallet),
                newly_assigned: grant.newly_assigned,
            })),
        )),
        Err(AllocError::PoolExhausted) => Ok((
            StatusCode::OK,
            Json(ApiResponse {
                code: error_codes::POOL_EXHAUSTED,
                msg: "exhausted".to_string(),
                data: Some(WalletData {
                    wallet: None,
                    newly_assigned: false,
                }),
            }),
        )),
        Err(err) => {
            let (status, resp) = alloc_error_response(&err);
            Err((status, Json(resp)))
        }
    }
}
