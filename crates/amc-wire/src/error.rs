/// Errors raised by the primitive layer: header sniffing and cursor reads.
///
/// Every variant that comes from the byte stream carries the absolute
/// offset at which it was detected. The format has no other addressing
/// scheme, so the offset is the only way to locate corruption in a file.
///
/// ```text
///   WireError
///   ├── InvalidFormat   ← bad signature, short prefix, binary-looking string
///   ├── InvalidLength   ← negative or implausible length prefix
///   ├── UnexpectedEof   ← fewer bytes left than a read requested
///   └── Io              ← anything else the underlying stream reports
/// ```
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The data is not shaped like a catalog.
    #[error("invalid format at offset {offset}: {reason}")]
    InvalidFormat { offset: u64, reason: String },

    /// A length prefix was negative or exceeded the configured limit.
    #[error("invalid length {length} at offset {offset} (limit {limit})")]
    InvalidLength { offset: u64, length: i64, limit: u64 },

    /// The stream ended before a read could be satisfied.
    ///
    /// `offset` is where the failing read started; `available` is how
    /// many of the `needed` bytes were actually consumed before the
    /// stream ran dry.
    #[error("unexpected end of input at offset {offset}: needed {needed} bytes, got {available}")]
    UnexpectedEof {
        offset: u64,
        needed: u64,
        available: u64,
    },

    /// I/O error from the underlying stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WireError {
    /// Absolute byte offset the error was detected at, if it came from
    /// the byte stream.
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::InvalidFormat { offset, .. }
            | Self::InvalidLength { offset, .. }
            | Self::UnexpectedEof { offset, .. } => Some(*offset),
            Self::Io(_) => None,
        }
    }

    /// Whether the error describes the bytes themselves (as opposed to a
    /// failure of the device or OS underneath them).
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
