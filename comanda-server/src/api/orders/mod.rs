//! Order printing API
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /imprimir_comanda | POST | 打印一张订单小票 |

mod handler;

use axum::{Router, routing::post};
use comanda_printer::PrinterDevice;

use crate::core::ServerState;

/// Order printing router
pub fn router<D: PrinterDevice>() -> Router<ServerState<D>> {
    Router::new().route("/imprimir_comanda", post(handler::print_order::<D>))
}
