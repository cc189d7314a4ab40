//! Receipt Printing Module
//!
//! - Renderer: turns an [`Order`](crate::orders::Order) into labelled ESC/POS blocks
//! - Service: serializes printer access and sends the blocks in order

pub mod renderer;
pub mod service;
pub mod types;

pub use renderer::ReceiptRenderer;
pub use service::{PrintService, PrintServiceError, PrintServiceResult};
pub use types::*;
