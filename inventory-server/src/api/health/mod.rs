//! 健康检查路由
//!
//! ```json
//! { "status": "ok", "version": "0.1.0", "products": 3 }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    products: usize,
}

async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthResponse>> {
    let products = state.products.find_all().await?.len();
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        products,
    }))
}
