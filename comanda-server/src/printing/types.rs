//! Receipt printing types

use serde::Serialize;
use std::fmt;

/// Section of a receipt, in print order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Headline,
    Items,
    PickupTime,
    Customer,
    Cut,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Headline => "headline",
            BlockKind::Items => "items",
            BlockKind::PickupTime => "pickup_time",
            BlockKind::Customer => "customer",
            BlockKind::Cut => "cut",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One chunk of ESC/POS data, written to the printer in a single call
#[derive(Debug, Clone)]
pub struct ReceiptBlock {
    pub kind: BlockKind,
    pub data: Vec<u8>,
}

/// A fully rendered receipt
#[derive(Debug, Clone, Default)]
pub struct Receipt {
    blocks: Vec<ReceiptBlock>,
}

impl Receipt {
    pub fn push(&mut self, kind: BlockKind, data: Vec<u8>) {
        self.blocks.push(ReceiptBlock { kind, data });
    }

    pub fn blocks(&self) -> &[ReceiptBlock] {
        &self.blocks
    }

    /// Block kinds in print order
    pub fn kinds(&self) -> Vec<BlockKind> {
        self.blocks.iter().map(|b| b.kind).collect()
    }

    /// Total bytes across all blocks
    pub fn len(&self) -> usize {
        self.blocks.iter().map(|b| b.data.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Returned to the caller after a receipt has been printed
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PrintSummary {
    pub order_number: String,
    pub items: usize,
    pub bytes_sent: usize,
}
