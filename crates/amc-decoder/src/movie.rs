use amc_types::{CustomValues, FieldDefinition, FormatVersion, MovieRecord};
use amc_wire::{CatalogSource, CursorReader};
use log::{debug, trace, warn};

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::extras::decode_extras;
use crate::picture::decode_picture;

/// Rating value that means "not rated" and is never rescaled.
pub const UNRATED: i32 = -1;

/// Number of colour tags; stored values are reduced modulo this.
pub const COLOR_TAG_COUNT: i32 = 13;

/// Result of one attempt to decode a movie record.
///
/// ```text
///   Decoded       ← a complete record, append it and keep going
///   EndOfRecords  ← the bytes stopped making sense: keep what we have
///   Fatal         ← the stream itself failed: abort the decode
/// ```
///
/// The movie stream has no count and no terminator; it simply runs until
/// a record cannot be decoded. So a format error inside a record is the
/// expected way for the loop to end on files with trailing junk, and it
/// is reported as [`EndOfRecords`](Self::EndOfRecords) with the offset the
/// failed record started at. The partial record is discarded.
#[derive(Debug)]
pub enum RecordOutcome {
    Decoded(Box<MovieRecord>),
    EndOfRecords { offset: u64, cause: DecodeError },
    Fatal(DecodeError),
}

/// Decoder for the movie records of one catalog.
///
/// Holds the parts of the decode context every record needs: the format
/// version gating each optional field, the custom-field schema values are
/// zipped against, and the corruption guards.
///
/// ```text
///   number │ date_added │ [date_watched │ user_rating]⁴²
///   rating │ year │ length │ video_bitrate │ audio_bitrate │ disks
///   [color_tag]⁴¹ │ checked (bool) │ media │ [media_type │ source]³³
///   borrower │ original_title │ translated_title │ director │ producer
///   [writer │ composer]⁴² │ country │ category │ [certification]⁴²
///   actors │ url │ description │ comments │ [file_path]⁴²
///   video_format │ audio_format │ resolution │ framerate │ languages
///   subtitles │ size │ picture │ [custom values]⁴⁰ │ [extras]⁴²
/// ```
///
/// Superscripts give the first version (×10) carrying the field. Integers
/// before `checked` are int32; everything after it is a string unless
/// noted. Absent fields keep their [`Default`] value.
pub struct MovieDecoder<'a> {
    version: FormatVersion,
    schema: &'a [FieldDefinition],
    config: &'a DecoderConfig,
    corrupt_subrecords: u64,
}

impl<'a> MovieDecoder<'a> {
    #[must_use]
    pub fn new(
        version: FormatVersion,
        schema: &'a [FieldDefinition],
        config: &'a DecoderConfig,
    ) -> Self {
        Self {
            version,
            schema,
            config,
            corrupt_subrecords: 0,
        }
    }

    /// Number of extras lists replaced with an empty list so far.
    #[must_use]
    pub fn corrupt_subrecords(&self) -> u64 {
        self.corrupt_subrecords
    }

    /// Decode the record starting at the reader's current offset.
    pub fn decode<S: CatalogSource>(&mut self, reader: &mut CursorReader<S>) -> RecordOutcome {
        let offset = reader.offset();
        match self.decode_record(reader) {
            Ok(movie) => RecordOutcome::Decoded(Box::new(movie)),
            Err(cause) if cause.is_recoverable() => {
                debug!("movie record at offset {offset} could not be decoded: {cause}");
                RecordOutcome::EndOfRecords { offset, cause }
            }
            Err(cause) => RecordOutcome::Fatal(cause),
        }
    }

    fn decode_record<S: CatalogSource>(
        &mut self,
        reader: &mut CursorReader<S>,
    ) -> Result<MovieRecord, DecodeError> {
        let v = self.version;
        let mut m = MovieRecord {
            number: reader.read_i32("number")?,
            date_added: reader.read_i32("date_added")?,
            ..MovieRecord::default()
        };
        trace!("movie #{} at offset {}", m.number, reader.offset());

        if v.has_extras() {
            m.date_watched = reader.read_i32("date_watched")?;
            m.user_rating = reader.read_i32("user_rating")?;
        }

        m.rating = reader.read_i32("rating")?;
        if v.has_legacy_rating_scale() && m.rating != UNRATED {
            m.rating = m.rating.saturating_mul(10);
        }

        m.year = reader.read_i32("year")?;
        m.length = reader.read_i32("length")?;
        m.video_bitrate = reader.read_i32("video_bitrate")?;
        m.audio_bitrate = reader.read_i32("audio_bitrate")?;
        m.disks = reader.read_i32("disks")?;

        if v.has_extended_fields() {
            m.color_tag = reader.read_i32("color_tag")?.rem_euclid(COLOR_TAG_COUNT);
        }

        m.checked = reader.read_bool("checked")?;
        m.media = reader.read_string("media")?;
        if v.has_media_type() {
            m.media_type = reader.read_string("media_type")?;
            m.source = reader.read_string("source")?;
        }

        m.borrower = reader.read_string("borrower")?;
        m.original_title = reader.read_string("original_title")?;
        m.translated_title = reader.read_string("translated_title")?;
        m.director = reader.read_string("director")?;
        m.producer = reader.read_string("producer")?;
        if v.has_extras() {
            m.writer = reader.read_string("writer")?;
            m.composer = reader.read_string("composer")?;
        }

        m.country = reader.read_string("country")?;
        m.category = reader.read_string("category")?;
        if v.has_extras() {
            m.certification = reader.read_string("certification")?;
        }

        m.actors = reader.read_string("actors")?;
        m.url = reader.read_string("url")?;
        m.description = reader.read_string("description")?;
        m.comments = reader.read_string("comments")?;
        if v.has_extras() {
            m.file_path = reader.read_string("file_path")?;
        }

        m.video_format = reader.read_string("video_format")?;
        m.audio_format = reader.read_string("audio_format")?;
        m.resolution = reader.read_string("resolution")?;
        m.framerate = reader.read_string("framerate")?;
        m.languages = reader.read_string("languages")?;
        m.subtitles = reader.read_string("subtitles")?;
        m.size = reader.read_string("size")?;

        m.picture = decode_picture(reader)?;

        if v.has_custom_fields() {
            m.custom_values = self.decode_custom_values(reader)?;
        }

        if v.has_extras() {
            m.extras = match decode_extras(reader, self.config.max_extras) {
                Ok(extras) => extras,
                Err(DecodeError::CorruptSubrecord { offset, count, .. }) => {
                    warn!(
                        "movie #{}: dropping extras, count {count} at offset {offset} is out of range",
                        m.number
                    );
                    self.corrupt_subrecords += 1;
                    Vec::new()
                }
                Err(e) => return Err(e),
            };
        }

        Ok(m)
    }

    fn decode_custom_values<S: CatalogSource>(
        &self,
        reader: &mut CursorReader<S>,
    ) -> Result<CustomValues, DecodeError> {
        let values = self
            .schema
            .iter()
            .map(|def| {
                let value = reader.read_string("custom_field_value")?;
                trace!("custom field {:?}: {value:?}", def.tag);
                Ok(value)
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;
        Ok(CustomValues::zip(self.schema, values))
    }
}
