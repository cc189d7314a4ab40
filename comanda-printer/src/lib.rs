//! # comanda-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Windows-1252 encoding for Latin printers
//! - USB printing (bulk OUT endpoint, located by vendor/product ID)
//!
//! Business logic (WHAT to print) stays in the application:
//! - Order receipt rendering → comanda-server
//!
//! ## Example
//!
//! ```ignore
//! use comanda_printer::{EscPosBuilder, PrintSession, PrinterDevice, UsbPrinter};
//!
//! let mut builder = EscPosBuilder::new();
//! builder.center();
//! builder.size(3, 3);
//! builder.line("ID: 42");
//! builder.reset_size();
//! builder.cut_feed(3);
//!
//! let printer = UsbPrinter::new(0x28E9, 0x0289);
//! let mut session = printer.open()?;
//! session.write(&builder.build())?;
//! session.close()?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use encoding::{encode_cp1252, truncate_text};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use printer::{PrintSession, PrinterDevice, UsbPrinter, UsbSession};
