use std::io::Read;

use log::info;

use crate::error::WireError;
use crate::source::CatalogSource;

/// Signature every catalog starts with: a space followed by "AMC_".
pub const AMC_SIGNATURE: &[u8; 5] = b" AMC_";

/// Size of the header block sniffed from the start of the file.
pub const HEADER_BLOCK_SIZE: usize = 100;

/// Absolute offset at which the structured payload begins.
///
/// This is a format constant. It does not depend on the length of the
/// header text, which may run past it inside the 100-byte sniff window.
pub const PAYLOAD_START: u64 = 65;

/// Header text is cut here when no null terminator is present.
pub const MAX_HEADER_TEXT: usize = 64;

/// Version assumed when the signature is not followed by `<major>.<minor>`.
pub const DEFAULT_VERSION: u32 = 10;

/// Catalog format version, `major * 10 + first digit of minor`.
///
/// The version gates which fields exist in each record. The helper
/// methods name the gates rather than scattering magic numbers through
/// the record decoders:
///
/// ```text
/// ┌─────────┬──────────────────────────────────────────────────────┐
/// │ Version │ Gate                                                 │
/// ├─────────┼──────────────────────────────────────────────────────┤
/// │ >= 33   │ movie media type + source                            │
/// │ <  35   │ legacy rating scale, owner ICQ string in properties  │
/// │ >= 40   │ custom field schema + per-movie custom values        │
/// │ >= 41   │ colour tag, extended schema field attributes         │
/// │ >= 42   │ watch date, user rating, writer/composer, extras ... │
/// └─────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatVersion(u32);

impl FormatVersion {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Movie records carry `mediaType` and `source` after `media`.
    #[must_use]
    pub const fn has_media_type(self) -> bool {
        self.0 >= 33
    }

    /// Ratings are stored on the old 0-10 scale and must be scaled up.
    #[must_use]
    pub const fn has_legacy_rating_scale(self) -> bool {
        self.0 < 35
    }

    /// The properties block still carries the deprecated ICQ identifier.
    #[must_use]
    pub const fn has_owner_icq(self) -> bool {
        self.0 < 35
    }

    /// A custom-field schema follows the properties block and every movie
    /// carries one value per schema entry.
    #[must_use]
    pub const fn has_custom_fields(self) -> bool {
        self.0 >= 40
    }

    /// Schema entries carry the extended attribute set, and movies a
    /// colour tag.
    #[must_use]
    pub const fn has_extended_fields(self) -> bool {
        self.0 >= 41
    }

    /// Movies carry watch date, user rating, writer, composer,
    /// certification, file path and a trailing extras list.
    #[must_use]
    pub const fn has_extras(self) -> bool {
        self.0 >= 42
    }
}

impl std::fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// The sniffed header block: format version plus display text.
///
/// ```text
/// ┌────────┬──────────┬─────────────────────────────────────────────┐
/// │ Offset │ Size     │ Description                                 │
/// ├────────┼──────────┼─────────────────────────────────────────────┤
/// │ 0      │ 5 bytes  │ Signature " AMC_"                           │
/// │ 5      │ ~3 bytes │ "<major>.<minor>" version digits            │
/// │ ...    │          │ Free text, null-terminated or cut at 64     │
/// │ 65     │          │ Structured payload starts here              │
/// │ 99     │          │ End of sniff window                         │
/// └────────┴──────────┴─────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmcHeader {
    pub version: FormatVersion,
    pub text: String,
}

impl AmcHeader {
    /// Parse a header from the first 100 bytes of the provided buffer.
    ///
    /// # Errors
    ///
    /// - [`WireError::InvalidFormat`] if the buffer is shorter than
    ///   [`HEADER_BLOCK_SIZE`] or does not start with [`AMC_SIGNATURE`].
    pub fn read_from(buf: &[u8]) -> Result<Self, WireError> {
        if buf.len() < HEADER_BLOCK_SIZE {
            return Err(WireError::InvalidFormat {
                offset: buf.len() as u64,
                reason: format!(
                    "file too small to contain a catalog header ({} of {HEADER_BLOCK_SIZE} bytes)",
                    buf.len()
                ),
            });
        }

        let block = &buf[..HEADER_BLOCK_SIZE];
        if !block.starts_with(AMC_SIGNATURE) {
            return Err(WireError::InvalidFormat {
                offset: 0,
                reason: "missing \" AMC_\" signature".to_string(),
            });
        }

        let text: String = block.iter().map(|&b| ascii_or_replacement(b)).collect();
        let version = parse_version(&text[AMC_SIGNATURE.len()..]);

        let display = match text.find('\0') {
            Some(end) => &text[..end],
            None => prefix_chars(&text, MAX_HEADER_TEXT),
        };

        Ok(Self {
            version,
            text: display.trim().to_string(),
        })
    }

    /// Open `source`, read the header block and release the stream again.
    ///
    /// # Errors
    ///
    /// [`WireError::Io`] if the source cannot be opened or read, plus
    /// everything [`read_from`](Self::read_from) returns.
    pub fn sniff<S: CatalogSource>(source: &S) -> Result<Self, WireError> {
        let (stream, _) = source.open()?;
        let mut prefix = Vec::with_capacity(HEADER_BLOCK_SIZE);
        stream
            .take(HEADER_BLOCK_SIZE as u64)
            .read_to_end(&mut prefix)?;

        let header = Self::read_from(&prefix)?;
        info!(
            "detected catalog version {} from header {:?}",
            header.version.raw(),
            header.text
        );
        Ok(header)
    }
}

/// Decode one header byte as ASCII, substituting U+FFFD for anything
/// outside the 7-bit range.
fn ascii_or_replacement(b: u8) -> char {
    if b.is_ascii() {
        char::from(b)
    } else {
        char::REPLACEMENT_CHARACTER
    }
}

fn prefix_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Extract `<major>.<minor>` from the five characters after the signature.
///
/// Only the first digit of the minor part counts, so `4.25` is version
/// 42. Anything unparsable falls back to [`DEFAULT_VERSION`].
fn parse_version(after_signature: &str) -> FormatVersion {
    let window = prefix_chars(after_signature, 5);
    let Some((major, minor)) = window.split_once('.') else {
        return FormatVersion(DEFAULT_VERSION);
    };

    let major = major.trim();
    let minor = minor.chars().next().unwrap_or('0');

    if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
        return FormatVersion(DEFAULT_VERSION);
    }
    let (Ok(major), Some(minor)) = (major.parse::<u32>(), minor.to_digit(10)) else {
        return FormatVersion(DEFAULT_VERSION);
    };

    FormatVersion(major * 10 + minor)
}
