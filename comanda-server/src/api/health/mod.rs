//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 服务和打印机状态 |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "ok",
//!   "version": "0.1.0",
//!   "printer": "28e9:0289",
//!   "printer_online": true
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use comanda_printer::PrinterDevice;
use serde::Serialize;

use crate::core::ServerState;

/// 健康检查路由
pub fn router<D: PrinterDevice>() -> Router<ServerState<D>> {
    Router::new().route("/health", get(health::<D>))
}

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 服务状态 (始终为 ok，打印机离线不影响)
    status: &'static str,
    /// 版本号
    version: &'static str,
    /// 打印机标识 (vendor:product)
    printer: String,
    /// 打印机是否已连接
    printer_online: bool,
}

/// 基础健康检查
pub async fn health<D: PrinterDevice>(State(state): State<ServerState<D>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        printer: state.printer.printer(),
        printer_online: state.printer.is_online().await,
    })
}
