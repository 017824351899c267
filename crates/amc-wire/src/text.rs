//! Single-byte text handling.
//!
//! Catalog strings are raw bytes in whatever code page the authoring
//! machine used. They are decoded as Latin-1: every byte maps to the code
//! point of the same value, so decoding never fails and the original
//! bytes can be recovered exactly with [`encode_latin1`].

/// Minimum fraction of printable characters for a string to pass the
/// binary-data heuristic.
pub const MIN_PRINTABLE_RATIO: f64 = 0.7;

/// Strings at or below this many bytes are never checked by the heuristic.
pub const PRINTABLE_CHECK_THRESHOLD: usize = 20;

/// Decode raw bytes as Latin-1.
#[must_use]
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encode a string produced by [`decode_latin1`] back into bytes.
///
/// Characters above U+00FF cannot come out of the decoder; they are
/// replaced with `?`.
#[must_use]
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// Whether a decoded character counts as printable text.
///
/// Tabs and line breaks count. Other controls (C0, DEL, C1), the
/// no-break space and the soft hyphen do not.
#[must_use]
pub fn is_printable(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || !(c.is_control() || c == '\u{a0}' || c == '\u{ad}')
}

/// Heuristic check that `text` looks like text rather than binary data.
///
/// Short strings always pass.
#[must_use]
pub fn looks_like_text(text: &str) -> bool {
    let total = text.chars().count();
    if total <= PRINTABLE_CHECK_THRESHOLD {
        return true;
    }
    let printable = text.chars().filter(|&c| is_printable(c)).count();
    #[allow(clippy::cast_precision_loss)]
    let ratio = printable as f64 / total as f64;
    ratio >= MIN_PRINTABLE_RATIO
}
