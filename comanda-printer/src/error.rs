//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// No attached device matches the vendor/product pair
    #[error("USB printer {vendor_id:04x}:{product_id:04x} not found")]
    NotFound { vendor_id: u16, product_id: u16 },

    /// The device exposes no bulk OUT endpoint to write to
    #[error("USB printer {0} has no bulk OUT endpoint")]
    NoBulkEndpoint(String),

    /// libusb reported an error
    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),

    /// Timeout waiting for printer
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The printer stopped accepting data before the whole job was sent
    #[error("Incomplete write: sent {sent} of {expected} bytes")]
    Incomplete { sent: usize, expected: usize },
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
