//! Order printing handlers

use axum::{Json, body::Bytes, extract::State};
use comanda_printer::PrinterDevice;

use crate::core::ServerState;
use crate::orders::Order;
use crate::printing::PrintSummary;
use crate::utils::{AppResponse, AppResult, ok_with_message};

/// Print an order receipt
///
/// The body is decoded by hand so that an empty body is reported as
/// "no data" rather than as a JSON extractor rejection.
pub async fn print_order<D: PrinterDevice>(
    State(state): State<ServerState<D>>,
    body: Bytes,
) -> AppResult<Json<AppResponse<PrintSummary>>> {
    let order = Order::from_json(&body)?;
    let summary = state.printer.print(&order).await?;
    Ok(ok_with_message(summary, "Comanda impresa exitosamente"))
}
