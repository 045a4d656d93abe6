//! 核心中间件模块

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use super::error::CoreError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub const MISSING_TOKEN_MESSAGE: &str = "No recibió ningún token en las cabeceras";

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let mut response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    info!(
        "[{}] {} {} - {} - {}ms - User-Agent: {:?}",
        request_id,
        method,
        uri,
        status,
        duration.as_millis(),
        user_agent
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// 删除操作的令牌检查
///
/// 只要求 `Authorization` 头存在，不校验其内容。
pub async fn require_authorization(req: Request, next: Next) -> Result<Response, CoreError> {
    if !req.headers().contains_key(header::AUTHORIZATION) {
        return Err(CoreError::BadRequest(MISSING_TOKEN_MESSAGE.to_string()));
    }

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();
    debug!(
        "Authorization header present: {}...",
        &token[..token.len().min(10)]
    );

    Ok(next.run(req).await)
}
