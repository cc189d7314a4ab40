//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data.

use crate::encoding::encode_cp1252;

/// ESC t n argument selecting WPC1252 on Epson-compatible printers
const CODE_PAGE_WPC1252: u8 = 16;

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for thermal printers.
/// Text is encoded to WPC1252 as it is written, so command parameters
/// are never touched by the encoder.
pub struct EscPosBuilder {
    buf: Vec<u8>,
}

impl EscPosBuilder {
    /// Create a new builder
    ///
    /// The buffer starts with printer initialisation and code page selection.
    pub fn new() -> Self {
        let mut buf = Vec::with_capacity(1024);
        // Initialize printer (ESC @), select WPC1252 (ESC t 16)
        buf.extend_from_slice(&[0x1B, 0x40, 0x1B, 0x74, CODE_PAGE_WPC1252]);
        Self { buf }
    }

    // === Text Output ===

    /// Write text (WPC1252 encoded)
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(&encode_cp1252(s));
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    // === Alignment ===

    /// Align text to center
    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    /// Align text to left (default)
    pub fn left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x00]);
        self
    }

    // === Character Size ===

    /// Character magnification
    ///
    /// Width and height multipliers are clamped to 1..=8.
    pub fn size(&mut self, width: u8, height: u8) -> &mut Self {
        // GS ! n - high nibble width, low nibble height
        let w = width.clamp(1, 8) - 1;
        let h = height.clamp(1, 8) - 1;
        self.buf.extend_from_slice(&[0x1D, 0x21, (w << 4) | h]);
        self
    }

    /// Reset to normal size
    pub fn reset_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]);
        self
    }

    // === Paper Control ===

    /// Full cut after feeding n lines
    /// Uses GS V 66 n, which lets the printer manage cutter-to-head distance.
    pub fn cut_feed(&mut self, lines: u8) -> &mut Self {
        // GS V 66 n - Full cut after feeding n lines
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x42, lines]);
        self
    }

    // === Build ===

    /// Take the bytes written so far, leaving the builder empty but usable
    ///
    /// Used to split one receipt into separately written blocks.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }

    /// Build the final byte buffer
    pub fn build(self) -> Vec<u8> {
        self.buf
    }

    /// Returns true when nothing has been written since the last flush
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new()
    }
}
