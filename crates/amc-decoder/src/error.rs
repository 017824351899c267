use amc_wire::WireError;

/// Errors that can occur while decoding a catalog.
///
/// ```text
///   DecodeError
///   ├── InvalidHeader(WireError)   ← signature missing or prefix too short
///   ├── CorruptSubrecord           ← extras count outside the accepted range
///   └── Wire(WireError)            ← primitive read failure (length, EOF, I/O)
/// ```
///
/// Whether an error is fatal depends on where it happens, not only on its
/// kind. A [`Wire`](Self::Wire) length or EOF failure inside a movie record
/// ends the movie stream quietly (see
/// [`RecordOutcome`](crate::RecordOutcome)); the same failure while reading
/// the properties block or the schema aborts the whole decode.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The 100-byte header block failed validation.
    #[error("invalid header: {0}")]
    InvalidHeader(WireError),

    /// A movie's extras count is outside `0..=limit`.
    ///
    /// Recovered locally: the movie keeps an empty extras list.
    #[error("corrupt extras sub-record at offset {offset}: count {count} outside 0..={limit}")]
    CorruptSubrecord { offset: u64, count: i32, limit: u32 },

    /// A primitive read failed.
    #[error(transparent)]
    Wire(#[from] WireError),
}

impl DecodeError {
    /// Absolute byte offset the failure was detected at, if known.
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::InvalidHeader(e) | Self::Wire(e) => e.offset(),
            Self::CorruptSubrecord { offset, .. } => Some(*offset),
        }
    }

    /// Whether this failure, raised inside a movie record, should end the
    /// movie stream rather than abort the decode.
    ///
    /// True for anything wrong with the bytes themselves. I/O failures of
    /// the underlying device are never recoverable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Wire(e) => e.is_format_error(),
            Self::CorruptSubrecord { .. } => true,
            Self::InvalidHeader(_) => false,
        }
    }
}
