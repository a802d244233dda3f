//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`products`] - 商品管理接口
//! - [`uploads`] - 上传图片访问

pub mod health;
pub mod products;
pub mod uploads;

use axum::Router;

use crate::core::ServerState;

/// All API routes, state not yet attached
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(uploads::router())
}
