//! Order receipt renderer
//!
//! Renders an Order into ESC/POS blocks for the counter printer.
//!
//! Layout:
//! ```text
//!        ID: 42            (center, x3)
//!
//! 2 Empanada               (left, x2)
//! 1 Pizza muzzarella
//!
//!        13:30             (center, x2)
//!
//! Marta                    (left, x1, optional)
//! ---------------- cut
//! ```

use comanda_printer::{EscPosBuilder, truncate_text};

use super::types::{BlockKind, Receipt};
use crate::orders::Order;

/// Lines fed before the cutter engages
const CUT_FEED_LINES: u8 = 3;

/// Receipt renderer
pub struct ReceiptRenderer {
    width: usize,
    print_customer: bool,
}

impl ReceiptRenderer {
    /// Create a renderer for the given paper width in characters
    pub fn new(width: usize, print_customer: bool) -> Self {
        Self {
            width,
            print_customer,
        }
    }

    /// Render an order to ESC/POS blocks
    ///
    /// Blocks are always headline, items, pickup time, [customer], cut.
    pub fn render(&self, order: &Order) -> Receipt {
        let mut b = EscPosBuilder::new();
        let mut receipt = Receipt::default();

        self.render_headline(&mut b, order);
        receipt.push(BlockKind::Headline, b.flush());

        self.render_items(&mut b, order);
        receipt.push(BlockKind::Items, b.flush());

        self.render_pickup_time(&mut b, order);
        receipt.push(BlockKind::PickupTime, b.flush());

        if self.render_customer(&mut b, order) {
            receipt.push(BlockKind::Customer, b.flush());
        }

        b.cut_feed(CUT_FEED_LINES);
        receipt.push(BlockKind::Cut, b.flush());

        receipt
    }

    /// Order number (large, centered)
    fn render_headline(&self, b: &mut EscPosBuilder, order: &Order) {
        b.center();
        b.size(3, 3);
        b.line(&format!("ID: {}", order.number));
        b.newline();
    }

    /// Product list (medium, left aligned), one line per item
    fn render_items(&self, b: &mut EscPosBuilder, order: &Order) {
        b.left();
        b.size(2, 2);
        for item in &order.items {
            b.line(&format!("{} {}", item.quantity, item.name));
        }
        b.newline();
    }

    /// Pickup time (medium, centered)
    fn render_pickup_time(&self, b: &mut EscPosBuilder, order: &Order) {
        b.center();
        b.size(2, 2);
        b.line(&order.pickup_time);
        b.newline();
    }

    /// Customer name (normal size, left aligned), only when enabled
    fn render_customer(&self, b: &mut EscPosBuilder, order: &Order) -> bool {
        if !self.print_customer {
            return false;
        }
        let Some(customer) = order
            .customer
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        else {
            return false;
        };

        b.left();
        b.reset_size();
        b.line(&truncate_text(customer, self.width));
        true
    }
}

impl Default for ReceiptRenderer {
    fn default() -> Self {
        Self::new(48, false)
    }
}
