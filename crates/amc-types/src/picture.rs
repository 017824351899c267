/// An embedded picture sub-record.
///
/// Present only when the stored size was positive. A sub-record with a
/// size of zero or less decodes to `None` at the owning record, never to
/// a `Picture` with empty bytes, so `Some` always means "there are image
/// bytes to do something with".
///
/// ```text
/// ┌────────────┬──────────────────────────────────────────────┐
/// │ Field      │ Description                                  │
/// ├────────────┼──────────────────────────────────────────────┤
/// │ path       │ Original file path the image was loaded from │
/// │ bytes      │ Raw image payload, never empty               │
/// │ extension  │ Lowercased ".ext" taken from `path`, or ""   │
/// └────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Picture {
    pub path: String,
    /// Serialized as its length; the payload itself stays binary.
    #[cfg_attr(feature = "serde", serde(rename = "size", serialize_with = "serialize_len"))]
    pub bytes: Vec<u8>,
    pub extension: String,
}

/// Extension used for extracted pictures whose path has none.
pub const FALLBACK_EXTENSION: &str = ".jpg";

impl Picture {
    /// Build a picture, deriving the extension from `path`.
    #[must_use]
    pub fn new(path: String, bytes: Vec<u8>) -> Self {
        let extension = extension_of(&path);
        Self {
            path,
            bytes,
            extension,
        }
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// File name an asset extractor writes this picture to.
    ///
    /// The name embeds the owning movie's number (zero-padded to four
    /// digits), its sanitized title and a caller-chosen suffix such as
    /// `"poster"` or an extra's title. Pictures without an extension get
    /// [`FALLBACK_EXTENSION`].
    ///
    /// ```text
    ///   0042_Blade_Runner_poster.jpg
    ///   0042_Blade_Runner_Trailer.png
    /// ```
    #[must_use]
    pub fn file_name(&self, movie_number: i32, title: &str, suffix: &str) -> String {
        let ext = if self.extension.is_empty() {
            FALLBACK_EXTENSION
        } else {
            &self.extension
        };
        format!(
            "{movie_number:04}_{}_{}{ext}",
            sanitize_file_stem(title),
            sanitize_file_stem(suffix)
        )
    }
}

/// Lowercased text after the last `.` in `path`, with the dot, or empty
/// when `path` contains no dot at all.
#[must_use]
pub fn extension_of(path: &str) -> String {
    match path.rsplit_once('.') {
        Some((_, ext)) => format!(".{}", ext.to_lowercase()),
        None => String::new(),
    }
}

/// Make a title safe to embed in a file name.
///
/// Keeps alphanumerics, spaces, `-` and `_`; drops everything else,
/// trims trailing whitespace and turns the remaining spaces into `_`.
#[must_use]
pub fn sanitize_file_stem(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    kept.trim_end().replace(' ', "_")
}

#[cfg(feature = "serde")]
#[allow(clippy::ptr_arg)]
fn serialize_len<S: serde::Serializer>(bytes: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(bytes.len() as u64)
}
