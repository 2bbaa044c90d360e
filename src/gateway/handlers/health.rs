//! Health check and pool observability handlers

use std::sync::Arc;

use axum::{Json, extract::State};
use utoipa::ToSchema;

use super::super::state::{AppState, now_ms};
use super::super::types::{ApiResponse, PoolData};

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
    /// Milliseconds since process start
    pub uptime_ms: u64,
    /// Wallets still available
    pub pool_remaining: usize,
}

/// Health check endpoint
///
/// The allocator is in-memory, so liveness of the handler implies liveness of
/// the core; the response carries the pool level for quick operator checks.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthResponse>> {
    let now = now_ms();
    Json(ApiResponse::success(HealthResponse {
        timestamp_ms: now,
        uptime_ms: now.saturating_sub(state.started_at_ms),
        pool_remaining: state.allocator.pool().remaining(),
    }))
}

/// Pool counters
///
/// The pool is consumed monotonically: `remaining` only ever decreases and
/// `assigned` only ever increases.
#[utoipa::path(
    get,
    path = "/api/v1/pool",
    responses(
        (status = 200, description = "Pool counters", body = PoolData)
    ),
    tag = "System"
)]
pub async fn get_pool_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<PoolData>> {
    let pool = state.allocator.pool();
    Json(ApiResponse::success(PoolData {
        remaining: pool.remaining(),
        initial_size: pool.initial_size(),
        assigned: state.allocator.assigned_count(),
    }))
}
