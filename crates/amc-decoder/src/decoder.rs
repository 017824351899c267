use std::path::Path;
use std::sync::Arc;

use amc_types::{Catalog, CatalogProperties, FieldDefinition, FormatVersion, MovieRecord};
use amc_wire::{AmcHeader, CatalogSource, CursorReader, FileSource, MemorySource, WireError};
use log::{debug, info};

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::movie::{MovieDecoder, RecordOutcome};
use crate::properties::decode_properties;
use crate::schema::decode_schema;

/// The result of decoding a catalog.
///
/// ```text
/// ┌───────────────────────────────────────────────────────────┐
/// │ DecodedCatalog                                            │
/// │   catalog:    Catalog           ← header, schema, movies  │
/// │   properties: CatalogProperties ← owner and description   │
/// │   stats:      DecodeStats       ← counters, stop reason   │
/// └───────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug)]
pub struct DecodedCatalog {
    pub catalog: Catalog,
    pub properties: CatalogProperties,
    pub stats: DecodeStats,
}

/// Counters collected during one decode.
#[derive(Debug, Default)]
pub struct DecodeStats {
    /// Bytes materialised by reads, header sniff excluded.
    pub bytes_read: u64,
    /// Non-empty strings decoded.
    pub strings_read: u64,
    pub movies_read: u64,
    /// Movies whose extras list was dropped as corrupt.
    pub corrupt_subrecords: u64,
    /// Total length of the catalog stream.
    pub stream_len: u64,
    /// Offset the cursor stopped at.
    pub end_offset: u64,
    /// Why the movie stream ended early, if it did.
    pub record_abort: Option<RecordAbort>,
}

impl DecodeStats {
    /// Offset of the record that could not be decoded, if any.
    #[must_use]
    pub fn record_abort_offset(&self) -> Option<u64> {
        self.record_abort.as_ref().map(|abort| abort.offset)
    }
}

/// The movie record that ended the movie stream.
#[derive(Debug)]
pub struct RecordAbort {
    /// Where the discarded record started.
    pub offset: u64,
    pub cause: DecodeError,
}

/// Decoder progress. Every decode walks these in order; the schema step
/// is skipped before version 4.0.
///
/// ```text
///   Start → HeaderParsed → PropertiesParsed → [SchemaParsed] → MoviesLoop → Done
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeState {
    Start,
    HeaderParsed,
    PropertiesParsed,
    SchemaParsed,
    MoviesLoop,
    Done,
}

/// Catalog decoder, the orchestrator over the record decoders.
///
/// [`open`](Self::open) sniffs the 100-byte header on a stream of its
/// own and fails fast on anything that is not a catalog. The payload is
/// then read by [`decode`](Self::decode), which consumes the decoder:
///
///   1. **Properties**: owner name, mail, site and description.
///   2. **Schema**: the custom-field definitions, from version 4.0.
///   3. **Movies**: records are decoded back to back while bytes remain.
///      The first record that fails on its bytes ends the stream; the
///      records before it are kept and the failure is reported in
///      [`DecodeStats::record_abort`]. An I/O failure aborts the decode.
///
/// Failures while reading properties or schema are fatal: without them
/// the cursor cannot be trusted to sit on the first movie.
///
/// The stream is opened on the first payload read and released on every
/// exit path, because the cursor reader owning it is dropped with the
/// decoder.
///
/// # Example
///
/// ```rust
/// use amc_decoder::{CatalogDecoder, DecoderConfig};
/// use amc_fixtures::CatalogWriter;
/// use amc_types::{FormatVersion, MovieRecord};
/// use amc_wire::MemorySource;
///
/// let bytes = CatalogWriter::new(FormatVersion::new(35))
///     .add_movie(MovieRecord { number: 1, ..MovieRecord::default() })
///     .encode()
///     .unwrap();
///
/// let decoder = CatalogDecoder::open(MemorySource::new(bytes), DecoderConfig::default()).unwrap();
/// let decoded = decoder.decode().unwrap();
/// assert_eq!(decoded.catalog.movies.len(), 1);
/// ```
pub struct CatalogDecoder<S: CatalogSource> {
    header: AmcHeader,
    reader: CursorReader<S>,
    config: DecoderConfig,
    state: DecodeState,
}

impl<S: CatalogSource> CatalogDecoder<S> {
    /// Sniff the header of `source` and prepare to decode it.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidHeader`] if the source is shorter than the
    ///   header block or lacks the signature.
    /// - [`DecodeError::Wire`] with [`WireError::Io`] if the source cannot
    ///   be read.
    pub fn open(source: S, config: DecoderConfig) -> Result<Self, DecodeError> {
        info!("opening catalog {}", source.describe());
        let header = AmcHeader::sniff(&source).map_err(|e| match e {
            WireError::Io(_) => DecodeError::Wire(e),
            other => DecodeError::InvalidHeader(other),
        })?;

        let reader = CursorReader::new(source)
            .with_start_offset(config.start_offset)
            .with_max_string_len(config.max_string_len)
            .with_string_validation(config.validate_strings);

        let mut decoder = Self {
            header,
            reader,
            config,
            state: DecodeState::Start,
        };
        decoder.advance(DecodeState::HeaderParsed);
        Ok(decoder)
    }

    #[must_use]
    pub fn header(&self) -> &AmcHeader {
        &self.header
    }

    #[must_use]
    pub fn version(&self) -> FormatVersion {
        self.header.version
    }

    #[must_use]
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Decode properties, schema and movies.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Wire`] if the properties block or the schema
    ///   cannot be read.
    /// - [`DecodeError::Wire`] with [`WireError::Io`] if the stream fails
    ///   while reading movies.
    pub fn decode(mut self) -> Result<DecodedCatalog, DecodeError> {
        let version = self.version();
        let stream_len = self.reader.stream_len()?;
        info!(
            "decoding catalog version {version} ({stream_len} bytes, payload at offset {})",
            self.reader.offset()
        );

        let properties = decode_properties(&mut self.reader, version)?;
        self.advance(DecodeState::PropertiesParsed);

        let field_schema = if version.has_custom_fields() {
            let schema = decode_schema(&mut self.reader, version)?;
            self.advance(DecodeState::SchemaParsed);
            schema
        } else {
            Vec::new()
        };

        self.advance(DecodeState::MoviesLoop);
        info!("reading movies from offset {}", self.reader.offset());
        let (movies, corrupt_subrecords, record_abort) = self.decode_movies(&field_schema)?;

        let counters = self.reader.counters();
        let end_offset = self.reader.offset();
        self.reader.close();
        self.advance(DecodeState::Done);

        let stats = DecodeStats {
            bytes_read: counters.bytes_read,
            strings_read: counters.strings_read,
            movies_read: movies.len() as u64,
            corrupt_subrecords,
            stream_len,
            end_offset,
            record_abort,
        };
        info!(
            "decoded {} movies, {} strings, {} bytes",
            stats.movies_read, stats.strings_read, stats.bytes_read
        );

        Ok(DecodedCatalog {
            catalog: Catalog {
                version,
                header: self.header.text,
                field_schema,
                movies,
            },
            properties,
            stats,
        })
    }

    fn decode_movies(
        &mut self,
        schema: &[FieldDefinition],
    ) -> Result<(Vec<MovieRecord>, u64, Option<RecordAbort>), DecodeError> {
        let mut movie_decoder = MovieDecoder::new(self.version(), schema, &self.config);
        let mut movies = Vec::new();
        let mut record_abort = None;

        while self.reader.has_remaining()? {
            match movie_decoder.decode(&mut self.reader) {
                RecordOutcome::Decoded(movie) => {
                    debug!(
                        "movie #{} {:?} decoded, now at offset {}",
                        movie.number,
                        movie.display_title(),
                        self.reader.offset()
                    );
                    movies.push(*movie);
                }
                RecordOutcome::EndOfRecords { offset, cause } => {
                    info!(
                        "movie stream ended at offset {offset} after {} movies: {cause}",
                        movies.len()
                    );
                    record_abort = Some(RecordAbort { offset, cause });
                    break;
                }
                RecordOutcome::Fatal(e) => return Err(e),
            }
        }

        Ok((movies, movie_decoder.corrupt_subrecords(), record_abort))
    }

    fn advance(&mut self, next: DecodeState) {
        debug!("decode state {:?} -> {next:?}", self.state);
        self.state = next;
    }
}

/// Decode the catalog file at `path`.
///
/// # Errors
///
/// Everything [`CatalogDecoder::open`] and [`CatalogDecoder::decode`]
/// return.
pub fn decode_file(
    path: impl AsRef<Path>,
    config: DecoderConfig,
) -> Result<DecodedCatalog, DecodeError> {
    CatalogDecoder::open(FileSource::new(path.as_ref()), config)?.decode()
}

/// Decode a catalog held in memory.
///
/// # Errors
///
/// Everything [`CatalogDecoder::open`] and [`CatalogDecoder::decode`]
/// return.
pub fn decode_bytes(
    bytes: impl Into<Arc<[u8]>>,
    config: DecoderConfig,
) -> Result<DecodedCatalog, DecodeError> {
    CatalogDecoder::open(MemorySource::new(bytes), config)?.decode()
}
