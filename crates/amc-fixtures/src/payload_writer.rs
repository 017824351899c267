use amc_types::{CatalogProperties, ExtraRecord, FormatVersion, MovieRecord, Picture};
use amc_wire::header::PAYLOAD_START;
use amc_wire::text::encode_latin1;

use crate::schema_field::SchemaField;

/// Primitive serializer for the catalog payload.
///
/// `PayloadWriter` appends little-endian primitives and whole sub-records
/// to a byte buffer, mirroring the reads the decoder performs. It writes
/// whatever it is given: values are not normalised (a legacy rating is
/// written as-is, a colour tag is not reduced) and custom values are not
/// checked against any schema, so tests can produce exactly the bytes
/// they mean to.
///
/// ```text
/// ┌──────────┬─────────────────────────────────────────────────┐
/// │ Method   │ Bytes                                           │
/// ├──────────┼─────────────────────────────────────────────────┤
/// │ i32      │ 4 bytes, little-endian                          │
/// │ bool     │ 1 byte, 0 or 1                                  │
/// │ string   │ int32 length + Latin-1 bytes                    │
/// │ raw      │ bytes copied verbatim                           │
/// └──────────┴─────────────────────────────────────────────────┘
/// ```
pub struct PayloadWriter {
    buf: Vec<u8>,
}

impl PayloadWriter {
    #[must_use]
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn i32(&mut self, value: i32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.buf.push(u8::from(value));
        self
    }

    /// Write a length-prefixed string, encoding it as Latin-1.
    pub fn string(&mut self, value: &str) -> &mut Self {
        self.raw_string(&encode_latin1(value))
    }

    /// Write a length-prefixed string from raw bytes.
    pub fn raw_string(&mut self, bytes: &[u8]) -> &mut Self {
        self.i32(wire_len(bytes.len())).raw(bytes)
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Write a picture sub-record. `None` is written as an empty path and
    /// a zero size.
    pub fn picture(&mut self, picture: Option<&Picture>) -> &mut Self {
        match picture {
            Some(pic) => {
                self.string(&pic.path)
                    .i32(wire_len(pic.bytes.len()))
                    .raw(&pic.bytes)
            }
            None => self.string("").i32(0),
        }
    }

    /// Write the properties block that opens the payload.
    pub fn properties(
        &mut self,
        version: FormatVersion,
        properties: &CatalogProperties,
    ) -> &mut Self {
        self.string(&properties.owner_name)
            .string(&properties.owner_mail);
        if version.has_owner_icq() {
            self.string("");
        }
        self.string(&properties.owner_site)
            .string(&properties.description)
    }

    /// Write a custom-field schema block, with empty column settings and
    /// GUI properties. Discarded attributes are written as empty strings,
    /// `false` flags and a zero separator.
    pub fn schema(&mut self, version: FormatVersion, fields: &[SchemaField]) -> &mut Self {
        let extended = version.has_extended_fields();
        self.string("").string("").i32(wire_len(fields.len()));

        for field in fields {
            let def = &field.definition;
            self.string(&def.tag).string(&def.name);
            if extended {
                self.string("");
            }
            self.string(&def.field_type).string(&def.default_value);
            if extended {
                self.string("");
            }
            self.bool(false);
            if extended {
                self.raw(&[0; 4]).bool(false).bool(false);
            }
            self.bool(false).string("");

            if def.is_list() {
                self.i32(wire_len(field.list_values.len()));
                for value in &field.list_values {
                    self.string(value);
                }
                if extended {
                    self.bool(false).bool(false).bool(false).bool(false);
                }
            }
        }
        self
    }

    /// Write a complete movie record, including its extras list when the
    /// version has one.
    pub fn movie(&mut self, version: FormatVersion, movie: &MovieRecord) -> &mut Self {
        self.movie_fields(version, movie);
        if version.has_extras() {
            self.extras(&movie.extras);
        }
        self
    }

    /// Write a movie record whose extras list is just `count`, with no
    /// extra bodies after it. Used to produce out-of-range counts.
    pub fn movie_with_extras_count(
        &mut self,
        version: FormatVersion,
        movie: &MovieRecord,
        count: i32,
    ) -> &mut Self {
        self.movie_fields(version, movie);
        if version.has_extras() {
            self.i32(count);
        }
        self
    }

    /// Write an extras list: count, then each extra.
    pub fn extras(&mut self, extras: &[ExtraRecord]) -> &mut Self {
        self.i32(wire_len(extras.len()));
        for extra in extras {
            self.bool(extra.checked)
                .string(&extra.tag)
                .string(&extra.title)
                .string(&extra.category)
                .string(&extra.url)
                .string(&extra.description)
                .string(&extra.comments)
                .string(&extra.created_by)
                .picture(extra.picture.as_ref());
        }
        self
    }

    fn movie_fields(&mut self, version: FormatVersion, m: &MovieRecord) {
        self.i32(m.number).i32(m.date_added);
        if version.has_extras() {
            self.i32(m.date_watched).i32(m.user_rating);
        }
        self.i32(m.rating)
            .i32(m.year)
            .i32(m.length)
            .i32(m.video_bitrate)
            .i32(m.audio_bitrate)
            .i32(m.disks);
        if version.has_extended_fields() {
            self.i32(m.color_tag);
        }
        self.bool(m.checked).string(&m.media);
        if version.has_media_type() {
            self.string(&m.media_type).string(&m.source);
        }
        self.string(&m.borrower)
            .string(&m.original_title)
            .string(&m.translated_title)
            .string(&m.director)
            .string(&m.producer);
        if version.has_extras() {
            self.string(&m.writer).string(&m.composer);
        }
        self.string(&m.country).string(&m.category);
        if version.has_extras() {
            self.string(&m.certification);
        }
        self.string(&m.actors)
            .string(&m.url)
            .string(&m.description)
            .string(&m.comments);
        if version.has_extras() {
            self.string(&m.file_path);
        }
        self.string(&m.video_format)
            .string(&m.audio_format)
            .string(&m.resolution)
            .string(&m.framerate)
            .string(&m.languages)
            .string(&m.subtitles)
            .string(&m.size)
            .picture(m.picture.as_ref());
        if version.has_custom_fields() {
            for (_, value) in m.custom_values.iter() {
                self.string(value);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer and return the payload bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// Consume the writer and return the payload behind a zero-filled
    /// prefix, so that it starts at the payload offset. The result has no
    /// valid header; it is meant for driving a cursor reader directly.
    #[must_use]
    pub fn into_file_bytes(self) -> Vec<u8> {
        let prefix = usize::try_from(PAYLOAD_START).unwrap_or(65);
        let mut bytes = vec![0u8; prefix];
        bytes.extend_from_slice(&self.buf);
        bytes
    }
}

/// Lengths and counts are int32 on disk; fixtures never get near the limit.
fn wire_len(len: usize) -> i32 {
    i32::try_from(len).expect("fixture length exceeds i32::MAX")
}

impl Default for PayloadWriter {
    fn default() -> Self {
        Self::new()
    }
}
