pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::allocator::WalletAllocator;
use state::AppState;

/// Build the versioned API router. Split out of `run_server` so tests can
/// drive the router without binding a socket.
pub fn build_router(allocator: Arc<WalletAllocator>) -> Router {
    let state = Arc::new(AppState::new(allocator));

    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/pool", get(handlers::get_pool_stats))
        .route("/wallet", get(handlers::get_wallet))
        .route("/referral", post(handlers::record_referral))
        .route("/referral/credits", get(handlers::get_referral_credits));

    Router::new()
        .nest("/api/v1", api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start the HTTP gateway server.
pub async fn run_server(host: &str, port: u16, allocator: Arc<WalletAllocator>) {
    let app = build_router(allocator);

    let addr = format!("{}:{}", host, port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("❌ FATAL: Failed to bind to {}: {}", addr, e);
            eprintln!(
                "   Hint: Port {} may already be in use. Check with: lsof -i :{}",
                port, port
            );
            std::process::exit(1);
        }
    };

    println!("🚀 Gateway listening on http://{}", addr);
    println!("📖 API Docs: http://{}/docs", addr);
    println!("💳 Wallet API: /api/v1/wallet?user_id=<id>");

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("❌ FATAL: Server error: {}", e);
        std::process::exit(1);
    }
}
