//! Order payload schema
//!
//! Incoming JSON is decoded into a typed [`Order`] before any printer
//! access. Quantity coercion happens here, so a receipt is never half
//! printed because of bad input.

mod types;

pub use types::{LineItem, Order, OrderError, OrderResult};
