use amc_types::{CatalogProperties, FormatVersion, MovieRecord};
use amc_wire::header::{HEADER_BLOCK_SIZE, MAX_HEADER_TEXT, PAYLOAD_START};

use crate::error::FixtureError;
use crate::payload_writer::PayloadWriter;
use crate::schema_field::SchemaField;

/// Builder for complete catalog files.
///
/// Collects properties, a custom-field schema and movie records, then
/// serializes them with [`encode`](Self::encode) in the layout of the
/// chosen format version:
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────┐
/// │ [65 bytes]   │ Header text, null padded                     │
/// │ [N bytes]    │ Properties block                             │
/// │ [N bytes]    │ Custom-field schema (4.0+)                   │
/// │ [N bytes]    │ Movie 0, Movie 1, ...                        │
/// │ [N bytes]    │ Raw trailing bytes, if any                   │
/// │ [0..35]      │ Zero padding up to the 100-byte header block │
/// └──────────────┴──────────────────────────────────────────────┘
/// ```
///
/// Real catalogs are never shorter than the header block the decoder
/// sniffs, so small fixtures are padded with zeros. Those zeros are too
/// short to form a movie record and end the movie stream.
///
/// # Usage
///
/// ```rust
/// use amc_fixtures::{CatalogWriter, SchemaField};
/// use amc_types::{FormatVersion, MovieRecord};
///
/// let bytes = CatalogWriter::new(FormatVersion::new(42))
///     .add_field(SchemaField::new("CF1", "Studio", "ftString", ""))
///     .add_movie(MovieRecord {
///         number: 1,
///         original_title: "Heat".into(),
///         custom_values: amc_types::CustomValues::zip(
///             &[SchemaField::new("CF1", "Studio", "ftString", "").definition],
///             vec!["Warner".into()],
///         ),
///         ..MovieRecord::default()
///     })
///     .encode()
///     .unwrap();
/// assert!(bytes.starts_with(b" AMC_4.2"));
/// ```
pub struct CatalogWriter {
    version: FormatVersion,
    header_text: Option<String>,
    properties: CatalogProperties,
    schema: Vec<SchemaField>,
    movies: Vec<PendingMovie>,
    trailing: Vec<u8>,
}

struct PendingMovie {
    movie: MovieRecord,
    /// Replaces the extras list with a bare count.
    extras_count: Option<i32>,
}

impl CatalogWriter {
    /// Start an empty catalog of the given version, with the standard
    /// header text for that version.
    #[must_use]
    pub fn new(version: FormatVersion) -> Self {
        Self {
            version,
            header_text: None,
            properties: CatalogProperties::default(),
            schema: Vec::new(),
            movies: Vec::new(),
            trailing: Vec::new(),
        }
    }

    /// The header text written for `version` unless overridden.
    #[must_use]
    pub fn default_header_text(version: FormatVersion) -> String {
        format!(" AMC_{version} Ant Movie Catalog {version}.0.0")
    }

    /// Replace the header text. Used to write unusual or invalid headers;
    /// the body layout still follows the writer's version.
    pub fn with_header_text(&mut self, text: &str) -> &mut Self {
        self.header_text = Some(text.to_string());
        self
    }

    pub fn with_properties(&mut self, properties: CatalogProperties) -> &mut Self {
        self.properties = properties;
        self
    }

    /// Append a custom-field definition. Ignored before version 4.0.
    pub fn add_field(&mut self, field: impl Into<SchemaField>) -> &mut Self {
        self.schema.push(field.into());
        self
    }

    pub fn add_movie(&mut self, movie: MovieRecord) -> &mut Self {
        self.movies.push(PendingMovie {
            movie,
            extras_count: None,
        });
        self
    }

    /// Append a movie whose extras list is replaced by a bare `count`.
    pub fn add_movie_with_extras_count(&mut self, movie: MovieRecord, count: i32) -> &mut Self {
        self.movies.push(PendingMovie {
            movie,
            extras_count: Some(count),
        });
        self
    }

    /// Append bytes after the last movie.
    pub fn append_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.trailing.extend_from_slice(bytes);
        self
    }

    /// Serialize the catalog.
    ///
    /// # Errors
    ///
    /// - [`FixtureError::HeaderTextTooLong`] if the header text is longer
    ///   than 64 bytes.
    /// - [`FixtureError::CustomValueCount`] if, from version 4.0 on, a
    ///   movie's custom values do not match the schema length.
    pub fn encode(&self) -> Result<Vec<u8>, FixtureError> {
        let text = self
            .header_text
            .clone()
            .unwrap_or_else(|| Self::default_header_text(self.version));
        if text.len() > MAX_HEADER_TEXT {
            return Err(FixtureError::HeaderTextTooLong {
                len: text.len(),
                limit: MAX_HEADER_TEXT,
            });
        }

        let custom = self.version.has_custom_fields();
        if custom {
            for pending in &self.movies {
                let actual = pending.movie.custom_values.len();
                if actual != self.schema.len() {
                    return Err(FixtureError::CustomValueCount {
                        number: pending.movie.number,
                        expected: self.schema.len(),
                        actual,
                    });
                }
            }
        }

        let mut payload = PayloadWriter::with_capacity(1024);
        payload.properties(self.version, &self.properties);
        if custom {
            payload.schema(self.version, &self.schema);
        }
        for pending in &self.movies {
            match pending.extras_count {
                Some(count) => payload.movie_with_extras_count(self.version, &pending.movie, count),
                None => payload.movie(self.version, &pending.movie),
            };
        }
        payload.raw(&self.trailing);

        #[allow(clippy::cast_possible_truncation)]
        let payload_start = PAYLOAD_START as usize;
        let mut bytes = text.into_bytes();
        bytes.resize(payload_start, 0);
        bytes.extend_from_slice(&payload.finish());
        if bytes.len() < HEADER_BLOCK_SIZE {
            bytes.resize(HEADER_BLOCK_SIZE, 0);
        }
        Ok(bytes)
    }

    /// Byte offset of every movie record in the encoded output.
    ///
    /// Lets tests truncate or corrupt a specific record.
    #[must_use]
    pub fn movie_offsets(&self) -> Vec<u64> {
        let mut payload = PayloadWriter::new();
        payload.properties(self.version, &self.properties);
        if self.version.has_custom_fields() {
            payload.schema(self.version, &self.schema);
        }

        let mut offsets = Vec::with_capacity(self.movies.len());
        for pending in &self.movies {
            offsets.push(PAYLOAD_START + payload.len() as u64);
            match pending.extras_count {
                Some(count) => payload.movie_with_extras_count(self.version, &pending.movie, count),
                None => payload.movie(self.version, &pending.movie),
            };
        }
        offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amc_types::CustomValues;

    #[test]
    fn empty_catalog_is_padded_to_header_block() {
        let bytes = CatalogWriter::new(FormatVersion::new(40)).encode().unwrap();
        assert_eq!(bytes.len(), HEADER_BLOCK_SIZE);
        assert!(bytes.starts_with(b" AMC_4.0 Ant Movie Catalog 4.0.0.0\0"));
    }

    #[test]
    fn header_text_override() {
        let bytes = CatalogWriter::new(FormatVersion::new(35))
            .with_header_text("not a catalog")
            .encode()
            .unwrap();
        assert!(bytes.starts_with(b"not a catalog\0"));
    }

    #[test]
    fn header_text_limit() {
        let long = "x".repeat(MAX_HEADER_TEXT + 1);
        let err = CatalogWriter::new(FormatVersion::new(35))
            .with_header_text(&long)
            .encode()
            .unwrap_err();
        assert!(matches!(err, FixtureError::HeaderTextTooLong { len: 65, limit: 64 }));
    }

    #[test]
    fn custom_values_must_match_schema() {
        let err = CatalogWriter::new(FormatVersion::new(40))
            .add_field(SchemaField::new("CF1", "One", "ftString", ""))
            .add_movie(MovieRecord {
                number: 9,
                ..MovieRecord::default()
            })
            .encode()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "movie #9 has 0 custom values but the schema defines 1"
        );
    }

    #[test]
    fn schema_ignored_before_40() {
        let field = SchemaField::new("CF1", "One", "ftString", "");
        let movie = MovieRecord {
            custom_values: CustomValues::zip(&[field.definition.clone()], vec!["v".into()]),
            ..MovieRecord::default()
        };
        let with = CatalogWriter::new(FormatVersion::new(35))
            .add_field(field)
            .add_movie(movie.clone())
            .encode()
            .unwrap();
        let without = CatalogWriter::new(FormatVersion::new(35))
            .add_movie(movie)
            .encode()
            .unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn movie_offsets_point_at_record_starts() {
        let mut writer = CatalogWriter::new(FormatVersion::new(42));
        writer
            .add_movie(MovieRecord {
                number: 0x11,
                ..MovieRecord::default()
            })
            .add_movie(MovieRecord {
                number: 0x22,
                ..MovieRecord::default()
            });
        let bytes = writer.encode().unwrap();
        let offsets = writer.movie_offsets();

        assert_eq!(offsets[0], 65 + 16 + 12);
        for (offset, number) in offsets.iter().zip([0x11u8, 0x22]) {
            let at = usize::try_from(*offset).unwrap();
            assert_eq!(&bytes[at..at + 4], &[number, 0, 0, 0]);
        }
    }
}
