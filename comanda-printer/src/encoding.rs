//! Windows-1252 encoding utilities for Latin thermal printers
//!
//! Most Epson-compatible printers ship with the WPC1252 code page (ESC t 16),
//! which covers Spanish text (ñ, á, ¿, ¡) and the euro sign.
//! This module provides utilities for:
//! - Converting UTF-8 text to single-byte WPC1252
//! - Truncating strings to a column width

/// Byte printed in place of characters the code page cannot represent
const REPLACEMENT: u8 = b'?';

/// Encode UTF-8 text as Windows-1252
///
/// Printable ASCII passes through unchanged. Characters outside the code
/// page are replaced with `?` instead of the HTML numeric references
/// `encoding_rs` would emit. Control characters other than `\n` are also
/// replaced, so text can never inject ESC/POS commands.
pub fn encode_cp1252(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    let mut tmp = [0u8; 4];
    for c in s.chars() {
        if c.is_ascii() {
            out.push(if is_unsafe_control(c) { REPLACEMENT } else { c as u8 });
            continue;
        }
        let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(c.encode_utf8(&mut tmp));
        if had_errors || bytes.len() != 1 {
            out.push(REPLACEMENT);
        } else {
            out.push(bytes[0]);
        }
    }
    out
}

fn is_unsafe_control(c: char) -> bool {
    c.is_ascii_control() && c != '\n'
}

/// Truncate a string to fit within a column width
pub fn truncate_text(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode_cp1252("2 Empanada"), b"2 Empanada".to_vec());
    }

    #[test]
    fn test_spanish_characters() {
        assert_eq!(encode_cp1252("Ñandú"), vec![0xD1, b'a', b'n', b'd', 0xFA]);
        assert_eq!(encode_cp1252("¿Sí?"), vec![0xBF, b'S', 0xED, b'?']);
        assert_eq!(encode_cp1252("5€"), vec![b'5', 0x80]);
    }

    #[test]
    fn test_unmappable_replaced() {
        assert_eq!(encode_cp1252("a中b"), b"a?b".to_vec());
        assert_eq!(encode_cp1252("🍕"), b"?".to_vec());
    }

    #[test]
    fn test_control_characters_replaced() {
        // GS V 0 would cut the paper mid-receipt
        assert_eq!(encode_cp1252("Flan\x1dV\x00"), b"Flan?V?".to_vec());
        assert_eq!(encode_cp1252("\x1b@a\tb\x7f"), b"?@a?b?".to_vec());
        assert_eq!(encode_cp1252("a\nb"), b"a\nb".to_vec());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello world", 5), "hello");
        assert_eq!(truncate_text("Ñoquis", 3), "Ñoq");
        assert_eq!(truncate_text("ab", 5), "ab");
    }
}
