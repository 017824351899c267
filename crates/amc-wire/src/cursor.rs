use std::io::{Read, Seek, SeekFrom};

use log::{debug, trace};

use crate::error::WireError;
use crate::header::PAYLOAD_START;
use crate::source::CatalogSource;
use crate::text::{decode_latin1, looks_like_text};

/// Length prefixes above this are treated as corruption.
pub const DEFAULT_MAX_STRING_LEN: u64 = 10_000_000;

/// Upper bound on the up-front allocation for a single read. Larger reads
/// still work; the buffer grows as bytes actually arrive, so a corrupt
/// size field cannot make us allocate gigabytes before hitting EOF.
const PREALLOC_LIMIT: u64 = 64 * 1024;

/// Running totals kept by the cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadCounters {
    /// Bytes materialised by reads (skipped bytes are not counted).
    pub bytes_read: u64,
    /// Non-empty strings decoded.
    pub strings_read: u64,
}

enum StreamSlot<T> {
    Unopened,
    Open(T),
    Closed,
}

/// Forward-only typed reader over a catalog stream.
///
/// The reader owns its [`CatalogSource`] and opens it on the first read,
/// seeking straight to the payload start (offset 65 by default). It never
/// seeks backwards. Every read advances [`offset`](Self::offset) by the
/// number of bytes it actually consumed, including a read that fails
/// half-way, so the offset always reflects the true stream position.
///
/// ```text
///   Unopened ──first read──▶ Open ──close()/drop──▶ Closed
/// ```
///
/// Primitive encodings:
///
/// ```text
/// ┌──────────┬─────────────────────────────────────────────────┐
/// │ Type     │ Encoding                                        │
/// ├──────────┼─────────────────────────────────────────────────┤
/// │ int32    │ 4 bytes, little-endian, signed                  │
/// │ bool     │ 1 byte, nonzero = true                          │
/// │ string   │ int32 length + that many Latin-1 bytes          │
/// │ raw      │ caller-supplied length, bytes copied verbatim   │
/// └──────────┴─────────────────────────────────────────────────┘
/// ```
pub struct CursorReader<S: CatalogSource> {
    source: S,
    stream: StreamSlot<S::Stream>,
    stream_len: u64,
    start_offset: u64,
    offset: u64,
    max_string_len: u64,
    validate_strings: bool,
    counters: ReadCounters,
}

impl<S: CatalogSource> CursorReader<S> {
    /// Create a reader over `source`. Nothing is opened yet.
    pub fn new(source: S) -> Self {
        Self {
            source,
            stream: StreamSlot::Unopened,
            stream_len: 0,
            start_offset: PAYLOAD_START,
            offset: PAYLOAD_START,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            validate_strings: false,
            counters: ReadCounters::default(),
        }
    }

    /// Start reading at `offset` instead of [`PAYLOAD_START`].
    ///
    /// Only meaningful before the first read.
    #[must_use]
    pub fn with_start_offset(mut self, offset: u64) -> Self {
        self.start_offset = offset;
        self.offset = offset;
        self
    }

    /// Reject string length prefixes above `limit`.
    #[must_use]
    pub fn with_max_string_len(mut self, limit: u64) -> Self {
        self.max_string_len = limit;
        self
    }

    /// Reject strings that look like binary data.
    #[must_use]
    pub fn with_string_validation(mut self, enabled: bool) -> Self {
        self.validate_strings = enabled;
        self
    }

    /// Absolute offset of the next unread byte.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub fn counters(&self) -> ReadCounters {
        self.counters
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Total length of the underlying stream. Opens it if necessary.
    ///
    /// # Errors
    ///
    /// [`WireError::Io`] if the stream cannot be opened.
    pub fn stream_len(&mut self) -> Result<u64, WireError> {
        self.ensure_open()?;
        Ok(self.stream_len)
    }

    /// Whether any bytes remain past the current offset.
    ///
    /// # Errors
    ///
    /// [`WireError::Io`] if the stream cannot be opened.
    pub fn has_remaining(&mut self) -> Result<bool, WireError> {
        Ok(self.offset < self.stream_len()?)
    }

    /// Release the stream. Later reads fail instead of reopening it.
    pub fn close(&mut self) {
        if matches!(self.stream, StreamSlot::Open(_)) {
            debug!("closing {} at offset {}", self.source.describe(), self.offset);
        }
        self.stream = StreamSlot::Closed;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.stream, StreamSlot::Open(_))
    }

    fn ensure_open(&mut self) -> Result<&mut S::Stream, WireError> {
        if matches!(self.stream, StreamSlot::Unopened) {
            let (mut stream, len) = self.source.open()?;
            stream.seek(SeekFrom::Start(self.start_offset))?;
            debug!(
                "opened {} ({len} bytes) for streaming at offset {}",
                self.source.describe(),
                self.start_offset
            );
            self.stream_len = len;
            self.stream = StreamSlot::Open(stream);
        }

        match &mut self.stream {
            StreamSlot::Open(stream) => Ok(stream),
            StreamSlot::Closed => Err(WireError::Io(std::io::Error::other(
                "cursor reader already closed",
            ))),
            StreamSlot::Unopened => unreachable!("stream opened above"),
        }
    }

    /// Read up to `len` bytes, advancing the offset by however many
    /// arrived, and fail if that was fewer than `len`.
    fn read_counted(&mut self, len: u64) -> Result<Vec<u8>, WireError> {
        let start = self.offset;
        let stream = self.ensure_open()?;

        let mut buf = Vec::with_capacity(usize::try_from(len.min(PREALLOC_LIMIT)).unwrap_or(0));
        let got = stream.by_ref().take(len).read_to_end(&mut buf)? as u64;

        self.offset += got;
        self.counters.bytes_read += got;

        if got < len {
            return Err(WireError::UnexpectedEof {
                offset: start,
                needed: len,
                available: got,
            });
        }
        Ok(buf)
    }

    /// Read a 4-byte little-endian signed integer.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_i32(&mut self, field: &str) -> Result<i32, WireError> {
        let start = self.offset;
        let bytes = self.read_counted(4)?;
        let value = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        trace!("{field} (pos {start}): {value}");
        Ok(value)
    }

    /// Read a 1-byte boolean; any nonzero value is `true`.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if the stream is exhausted.
    pub fn read_bool(&mut self, field: &str) -> Result<bool, WireError> {
        let start = self.offset;
        let value = self.read_counted(1)?[0] != 0;
        trace!("{field} (pos {start}): {value}");
        Ok(value)
    }

    /// Read an int32 length prefix followed by that many Latin-1 bytes.
    ///
    /// A zero length yields an empty string and consumes only the prefix.
    ///
    /// # Errors
    ///
    /// - [`WireError::InvalidLength`] for a negative length or one above
    ///   the configured limit. The offset is that of the prefix.
    /// - [`WireError::UnexpectedEof`] if the prefix or body is truncated.
    /// - [`WireError::InvalidFormat`] if validation is enabled and the
    ///   string looks like binary data.
    pub fn read_string(&mut self, field: &str) -> Result<String, WireError> {
        let start = self.offset;
        let length = self.read_i32(field)?;

        if length == 0 {
            trace!("{field} (pos {start}): <empty>");
            return Ok(String::new());
        }

        let Ok(len) = u64::try_from(length) else {
            return Err(WireError::InvalidLength {
                offset: start,
                length: i64::from(length),
                limit: self.max_string_len,
            });
        };
        if len > self.max_string_len {
            return Err(WireError::InvalidLength {
                offset: start,
                length: i64::from(length),
                limit: self.max_string_len,
            });
        }

        let bytes = self.read_counted(len)?;
        self.counters.strings_read += 1;
        let text = decode_latin1(&bytes);

        if self.validate_strings && !looks_like_text(&text) {
            return Err(WireError::InvalidFormat {
                offset: start,
                reason: format!("{field} appears to be binary data ({len} bytes)"),
            });
        }

        trace!("{field} (pos {start}): {}", preview(&text));
        Ok(text)
    }

    /// Read exactly `len` raw bytes.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than `len` bytes remain.
    pub fn read_bytes(&mut self, len: u64, field: &str) -> Result<Vec<u8>, WireError> {
        let start = self.offset;
        let bytes = self.read_counted(len)?;
        trace!("{field} (pos {start}): {len} bytes");
        Ok(bytes)
    }

    /// Advance `len` bytes without reading them.
    ///
    /// This is a pure seek. Skipping past the end is not detected here;
    /// the next read reports it.
    ///
    /// # Errors
    ///
    /// [`WireError::Io`] if the seek fails.
    pub fn skip(&mut self, len: u64, reason: &str) -> Result<(), WireError> {
        let delta = i64::try_from(len)
            .map_err(|_| std::io::Error::other(format!("skip of {len} bytes out of range")))?;
        let stream = self.ensure_open()?;
        stream.seek(SeekFrom::Current(delta))?;
        self.offset += len;
        trace!("skipped {len} bytes: {reason} (now at pos {})", self.offset);
        Ok(())
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > 50 {
        let head: String = text.chars().take(50).collect();
        format!("{head:?}...")
    } else {
        format!("{text:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    /// Build a buffer whose payload (after `PAYLOAD_START` filler) is `body`.
    fn reader(body: &[u8]) -> CursorReader<MemorySource> {
        let mut bytes = vec![0u8; usize::try_from(PAYLOAD_START).unwrap()];
        bytes.extend_from_slice(body);
        CursorReader::new(MemorySource::new(bytes))
    }

    fn string_bytes(s: &[u8]) -> Vec<u8> {
        let mut out = i32::try_from(s.len()).unwrap().to_le_bytes().to_vec();
        out.extend_from_slice(s);
        out
    }

    #[test]
    fn lazy_open_starts_at_payload() {
        let mut r = reader(&7i32.to_le_bytes());
        assert!(!r.is_open());
        assert_eq!(r.offset(), 65);
        assert_eq!(r.read_i32("n").unwrap(), 7);
        assert!(r.is_open());
        assert_eq!(r.offset(), 69);
    }

    #[test]
    fn reads_negative_int() {
        let mut r = reader(&(-1i32).to_le_bytes());
        assert_eq!(r.read_i32("n").unwrap(), -1);
    }

    #[test]
    fn bool_nonzero_is_true() {
        let mut r = reader(&[0, 1, 0xFF]);
        assert!(!r.read_bool("a").unwrap());
        assert!(r.read_bool("b").unwrap());
        assert!(r.read_bool("c").unwrap());
    }

    #[test]
    fn empty_string_consumes_four_bytes() {
        let mut r = reader(&[0, 0, 0, 0, 9]);
        assert_eq!(r.read_string("s").unwrap(), "");
        assert_eq!(r.offset(), 69);
        assert_eq!(r.counters().strings_read, 0);
    }

    #[test]
    fn string_preserves_high_bytes() {
        let mut r = reader(&string_bytes(b"Am\xe9lie"));
        assert_eq!(r.read_string("title").unwrap(), "Amélie");
        assert_eq!(r.offset(), 65 + 4 + 6);
        assert_eq!(r.counters().strings_read, 1);
        assert_eq!(r.counters().bytes_read, 10);
    }

    #[test]
    fn negative_length_is_invalid() {
        let mut r = reader(&(-5i32).to_le_bytes());
        let err = r.read_string("s").unwrap_err();
        assert!(matches!(
            err,
            WireError::InvalidLength {
                offset: 65,
                length: -5,
                ..
            }
        ));
        assert_eq!(r.offset(), 69);
    }

    #[test]
    fn implausible_length_is_invalid() {
        let mut r = reader(&10_000_001i32.to_le_bytes());
        assert!(matches!(
            r.read_string("s"),
            Err(WireError::InvalidLength {
                length: 10_000_001,
                ..
            })
        ));
    }

    #[test]
    fn custom_length_limit() {
        let mut r = reader(&string_bytes(b"hello")).with_max_string_len(4);
        assert!(matches!(
            r.read_string("s"),
            Err(WireError::InvalidLength { limit: 4, .. })
        ));
    }

    #[test]
    fn truncated_string_reports_partial_progress() {
        let mut body = 10i32.to_le_bytes().to_vec();
        body.extend_from_slice(b"abc");
        let mut r = reader(&body);
        let err = r.read_string("s").unwrap_err();
        assert!(matches!(
            err,
            WireError::UnexpectedEof {
                offset: 69,
                needed: 10,
                available: 3
            }
        ));
        assert_eq!(r.offset(), 72);
    }

    #[test]
    fn truncated_int_is_eof() {
        let mut r = reader(&[1, 2]);
        assert!(matches!(
            r.read_i32("n"),
            Err(WireError::UnexpectedEof {
                offset: 65,
                needed: 4,
                available: 2
            })
        ));
        assert_eq!(r.offset(), 67);
    }

    #[test]
    fn raw_bytes_exact() {
        let mut r = reader(&[1, 2, 3, 4, 5]);
        assert_eq!(r.read_bytes(3, "blob").unwrap(), vec![1, 2, 3]);
        assert!(matches!(
            r.read_bytes(3, "blob"),
            Err(WireError::UnexpectedEof { available: 2, .. })
        ));
    }

    #[test]
    fn skip_is_pure_seek() {
        let mut body = vec![0xAA; 4];
        body.extend_from_slice(&42i32.to_le_bytes());
        let mut r = reader(&body);
        r.skip(4, "separator").unwrap();
        assert_eq!(r.offset(), 69);
        assert_eq!(r.counters().bytes_read, 0);
        assert_eq!(r.read_i32("n").unwrap(), 42);
    }

    #[test]
    fn validation_rejects_binary_strings() {
        let blob = [0u8; 32];
        let mut r = reader(&string_bytes(&blob)).with_string_validation(true);
        assert!(matches!(
            r.read_string("comments"),
            Err(WireError::InvalidFormat { offset: 65, .. })
        ));

        let mut r = reader(&string_bytes(&blob));
        assert_eq!(r.read_string("comments").unwrap().len(), 32);
    }

    #[test]
    fn has_remaining_tracks_end() {
        let mut r = reader(&[1]);
        assert!(r.has_remaining().unwrap());
        r.read_bool("b").unwrap();
        assert!(!r.has_remaining().unwrap());
        assert_eq!(r.stream_len().unwrap(), 66);
    }

    #[test]
    fn reads_fail_after_close() {
        let mut r = reader(&[1, 2, 3, 4]);
        r.read_bool("b").unwrap();
        r.close();
        assert!(!r.is_open());
        assert!(matches!(r.read_bool("b"), Err(WireError::Io(_))));
    }

    #[test]
    fn custom_start_offset() {
        let mut r = CursorReader::new(MemorySource::new(vec![5u8, 0, 0, 0])).with_start_offset(0);
        assert_eq!(r.read_i32("n").unwrap(), 5);
    }
}
