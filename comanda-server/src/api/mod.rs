//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查 (含打印机在线状态)
//! - [`orders`] - 小票打印接口

pub mod health;
pub mod orders;

use axum::Router;
use comanda_printer::PrinterDevice;
use http::{HeaderName, HeaderValue};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub use crate::utils::{AppResponse, AppResult};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router<D: PrinterDevice>() -> Router<ServerState<D>> {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
}

/// Build a fully configured application with middleware and state
///
/// Used by the HTTP server and by in-process tests.
pub fn build_app<D: PrinterDevice>(state: ServerState<D>) -> Router {
    build_router::<D>()
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}
