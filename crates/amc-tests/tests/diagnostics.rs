//! Error messages, pinned with inline snapshots.
//!
//! The offsets in these messages are what a user has to go on when a
//! catalog is damaged, so they are checked exactly. Every catalog here
//! has a layout small enough to work the offsets out by hand.

use amc_decoder::{DecodeError, DecoderConfig, decode_bytes};
use amc_fixtures::{CatalogWriter, PayloadWriter};
use amc_types::{FormatVersion, MovieRecord};
use insta::assert_snapshot;

fn header(version: FormatVersion) -> Vec<u8> {
    let mut bytes = CatalogWriter::default_header_text(version).into_bytes();
    bytes.resize(65, 0);
    bytes
}

fn decode_err(bytes: Vec<u8>) -> DecodeError {
    decode_bytes(bytes, DecoderConfig::default()).expect_err("decode should fail")
}

#[test]
fn missing_signature_message() {
    let mut bytes = b"Ant Movie Catalog".to_vec();
    bytes.resize(100, 0);
    assert_snapshot!(
        decode_err(bytes).to_string(),
        @r#"invalid header: invalid format at offset 0: missing " AMC_" signature"#
    );
}

#[test]
fn short_file_message() {
    assert_snapshot!(
        decode_err(b" AMC_4.2".to_vec()).to_string(),
        @"invalid header: invalid format at offset 8: file too small to contain a catalog header (8 of 100 bytes)"
    );
}

#[test]
fn truncated_properties_message() {
    // Owner name claims 50 bytes at offset 65; the body starts at 69 and
    // the file ends at 100.
    let mut bytes = header(FormatVersion::new(42));
    let mut payload = PayloadWriter::new();
    payload.i32(50).raw(&[b'a'; 31]);
    bytes.extend_from_slice(&payload.finish());

    assert_snapshot!(
        decode_err(bytes).to_string(),
        @"unexpected end of input at offset 69: needed 50 bytes, got 31"
    );
}

#[test]
fn negative_properties_length_message() {
    let mut bytes = header(FormatVersion::new(35));
    let mut payload = PayloadWriter::new();
    payload.i32(-5);
    bytes.extend_from_slice(&payload.finish());
    bytes.resize(100, 0);

    let err = decode_err(bytes);
    assert_eq!(err.offset(), Some(65));
    assert_snapshot!(
        err.to_string(),
        @"invalid length -5 at offset 65 (limit 10000000)"
    );
}

#[test]
fn garbage_length_in_movie_message() {
    // Properties: 4 empty strings, 65..81. One default 3.5 movie: 8 ints,
    // a bool, 21 empty strings and an empty picture, 81..206. The raw
    // record at 206 has its media length at 239.
    let mut raw = PayloadWriter::new();
    for _ in 0..8 {
        raw.i32(0);
    }
    raw.bool(false).i32(-7);

    let bytes = CatalogWriter::new(FormatVersion::new(35))
        .add_movie(MovieRecord {
            number: 1,
            ..MovieRecord::default()
        })
        .append_raw(&raw.finish())
        .encode()
        .unwrap();

    let decoded = decode_bytes(bytes, DecoderConfig::default()).unwrap();
    let abort = decoded.stats.record_abort.expect("second record should abort");
    assert_eq!(decoded.catalog.movies.len(), 1);
    assert_eq!(abort.offset, 206);
    assert_snapshot!(
        abort.cause.to_string(),
        @"invalid length -7 at offset 239 (limit 10000000)"
    );
}

#[test]
fn binary_string_message() {
    let binary: String = (0u8..40).map(char::from).collect();
    let bytes = CatalogWriter::new(FormatVersion::new(35))
        .add_movie(MovieRecord {
            number: 1,
            comments: binary,
            ..MovieRecord::default()
        })
        .encode()
        .unwrap();
    let config = DecoderConfig {
        validate_strings: true,
        ..DecoderConfig::default()
    };

    let decoded = decode_bytes(bytes, config).unwrap();
    let abort = decoded.stats.record_abort.expect("movie should abort");
    assert_snapshot!(
        abort.cause.to_string(),
        @"invalid format at offset 166: comments appears to be binary data (40 bytes)"
    );
}

#[test]
fn corrupt_subrecord_message() {
    let err = DecodeError::CorruptSubrecord {
        offset: 4242,
        count: -1,
        limit: 1000,
    };
    assert!(err.is_recoverable());
    assert_snapshot!(
        err.to_string(),
        @"corrupt extras sub-record at offset 4242: count -1 outside 0..=1000"
    );
}
