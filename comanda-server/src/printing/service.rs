//! Receipt print service - renders an order and sends it to the printer

use std::sync::Arc;

use comanda_printer::{PrintError, PrintResult, PrintSession, PrinterDevice};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

use super::renderer::ReceiptRenderer;
use super::types::{PrintSummary, Receipt};
use crate::orders::Order;

#[derive(Debug, Error)]
pub enum PrintServiceError {
    #[error(transparent)]
    Printer(#[from] PrintError),

    #[error("Print task failed: {0}")]
    Join(String),
}

pub type PrintServiceResult<T> = Result<T, PrintServiceError>;

/// Receipt print service
///
/// Responsibilities:
/// - Render orders into ESC/POS blocks
/// - Keep one print job on the device at a time
/// - Open, write, cut and release the printer for every job
pub struct PrintService<D: PrinterDevice> {
    device: Arc<D>,
    renderer: Arc<ReceiptRenderer>,
    /// Held for the whole open → write → close sequence
    lock: Arc<Mutex<()>>,
}

impl<D: PrinterDevice> Clone for PrintService<D> {
    fn clone(&self) -> Self {
        Self {
            device: self.device.clone(),
            renderer: self.renderer.clone(),
            lock: self.lock.clone(),
        }
    }
}

impl<D: PrinterDevice> PrintService<D> {
    pub fn new(device: D, renderer: ReceiptRenderer) -> Self {
        Self {
            device: Arc::new(device),
            renderer: Arc::new(renderer),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Printer identity for logs and health output
    pub fn printer(&self) -> String {
        self.device.describe()
    }

    /// Print one order
    ///
    /// The receipt is rendered before the device is touched. Device access
    /// is serialized across concurrent requests.
    #[instrument(skip(self, order), fields(order = %order.number, items = order.items.len()))]
    pub async fn print(&self, order: &Order) -> PrintServiceResult<PrintSummary> {
        let receipt = self.renderer.render(order);
        let summary = PrintSummary {
            order_number: order.number.clone(),
            items: order.items.len(),
            bytes_sent: receipt.len(),
        };

        // Held by the blocking job, which outlives a cancelled request
        let guard = self.lock.clone().lock_owned().await;

        let device = self.device.clone();
        tokio::task::spawn_blocking(move || {
            let result = dispatch(device.as_ref(), &receipt);
            drop(guard);
            result
        })
        .await
        .map_err(|e| PrintServiceError::Join(e.to_string()))??;

        info!(bytes = summary.bytes_sent, "Order printed successfully");
        Ok(summary)
    }

    /// Check if the printer is attached
    pub async fn is_online(&self) -> bool {
        let device = self.device.clone();
        tokio::task::spawn_blocking(move || device.is_online())
            .await
            .unwrap_or(false)
    }
}

/// Open the printer, write every block in order, then close it
///
/// An early return drops the session, which releases the device.
fn dispatch<D: PrinterDevice>(device: &D, receipt: &Receipt) -> PrintResult<()> {
    let mut session = device.open().inspect_err(|e| {
        error!(printer = %device.describe(), error = %e, "Failed to open printer");
    })?;
    info!(printer = %device.describe(), "Printer connected");

    for block in receipt.blocks() {
        session.write(&block.data).inspect_err(|e| {
            error!(block = %block.kind, error = %e, "Failed to write block");
        })?;
        debug!(block = %block.kind, bytes = block.data.len(), "Block sent");
    }

    session.close()
}
