//! # 咖啡集合服务
//!
//! 基于 Axum 的 `/cafes` CRUD 接口，数据保存在进程内存中：
//! - `app`：咖啡模型、服务与处理器
//! - `core`：统一错误响应与中间件
//! - `infrastructure`：日志初始化
//! - `config`：TOML 配置

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

use std::time::Duration;

use axum::{
    handler::Handler,
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use app::cafe::handler::{self, AppState};
use crate::core::middleware::{request_logging_middleware, require_authorization};

pub use app::cafe::{Cafe, CafeService};
pub use config::Config;
pub use crate::core::error::{CoreError, ErrorResponse};

/// 构建完整路由
pub fn build_router(state: AppState, timeout: Duration) -> Router {
    Router::new()
        .route(
            "/cafes",
            get(handler::list_cafes)
                .post(handler::create_cafe)
                .fallback(handler::route_not_found),
        )
        .route(
            "/cafes/:id",
            get(handler::get_cafe)
                .put(handler::update_cafe)
                .delete(handler::delete_cafe.layer(middleware::from_fn(require_authorization)))
                .fallback(handler::route_not_found),
        )
        .fallback(handler::route_not_found)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(timeout))
        .with_state(state)
}

/// 根据配置创建状态与路由
pub fn app_from_config(config: &Config) -> anyhow::Result<Router> {
    let seed = config.seed_cafes()?;
    let service = CafeService::new(seed);
    Ok(build_router(
        AppState::new(service),
        Duration::from_secs(config.http.timeout_seconds),
    ))
}
