//! Truncation sweeps.
//!
//! A catalog cut at any byte must still decode to the movies that lie
//! entirely before the cut, in order, with nothing invented after them.
//! Cuts inside the header block are rejected as invalid headers; cuts
//! inside the properties or schema fail with the underlying read error.

use amc_decoder::{DecodeError, DecodedCatalog, DecoderConfig, decode_bytes};
use amc_tests::{sample_catalog, sample_writer};
use amc_types::FormatVersion;
use amc_wire::WireError;
use amc_wire::header::HEADER_BLOCK_SIZE;

const MOVIES: usize = 6;

/// End offset of every movie in `bytes`, given the start offsets.
fn movie_ends(offsets: &[u64], total: u64) -> Vec<u64> {
    offsets.iter().skip(1).copied().chain([total]).collect()
}

fn decode_cut(bytes: &[u8], cut: usize) -> Result<DecodedCatalog, DecodeError> {
    decode_bytes(bytes[..cut].to_vec(), DecoderConfig::default())
}

fn sweep(version: FormatVersion) {
    let writer = sample_writer(version, MOVIES);
    let bytes = writer.encode().unwrap();
    let offsets = writer.movie_offsets();
    let ends = movie_ends(&offsets, bytes.len() as u64);
    let full = decode_bytes(bytes.clone(), DecoderConfig::default()).unwrap();
    assert_eq!(full.catalog.movies.len(), MOVIES);

    let first_movie = usize::try_from(offsets[0]).unwrap();
    let mut previous = 0;

    for cut in 0..=bytes.len() {
        let result = decode_cut(&bytes, cut);

        if cut < HEADER_BLOCK_SIZE {
            assert!(
                matches!(result, Err(DecodeError::InvalidHeader(_))),
                "version {version}, cut {cut}: expected invalid header"
            );
            continue;
        }
        if cut < first_movie {
            assert!(
                matches!(result, Err(DecodeError::Wire(WireError::UnexpectedEof { .. }))),
                "version {version}, cut {cut}: expected end of input in properties or schema"
            );
            continue;
        }

        let decoded = result
            .unwrap_or_else(|e| panic!("version {version}, cut {cut}: decode failed: {e}"));
        let complete = ends.iter().filter(|&&end| end <= cut as u64).count();
        let movies = &decoded.catalog.movies;

        assert_eq!(movies.len(), complete, "version {version}, cut {cut}");
        assert_eq!(
            movies.as_slice(),
            &full.catalog.movies[..complete],
            "version {version}, cut {cut}: movies must be a prefix of the full decode"
        );
        assert!(movies.len() >= previous, "version {version}, cut {cut}");
        previous = movies.len();

        let on_boundary = cut == first_movie || ends.contains(&(cut as u64));
        assert_eq!(
            decoded.stats.record_abort.is_none(),
            on_boundary,
            "version {version}, cut {cut}: a cut inside a record must be reported"
        );
        if let Some(abort) = &decoded.stats.record_abort {
            assert_eq!(abort.offset, offsets[complete], "version {version}, cut {cut}");
            assert!(abort.cause.is_recoverable());
        }
    }
}

#[test]
fn truncation_sweep_v42() {
    sweep(FormatVersion::new(42));
}

#[test]
fn truncation_sweep_v40() {
    sweep(FormatVersion::new(40));
}

#[test]
fn truncation_sweep_v33() {
    sweep(FormatVersion::new(33));
}

#[test]
fn truncation_sweep_v10() {
    sweep(FormatVersion::new(10));
}

#[test]
fn record_abort_offset_points_at_damaged_movie() {
    let writer = sample_writer(FormatVersion::new(42), 3);
    let bytes = writer.encode().unwrap();
    let offsets = writer.movie_offsets();

    let cut = usize::try_from(offsets[2]).unwrap() + 10;
    let decoded = decode_cut(&bytes, cut).unwrap();
    assert_eq!(decoded.catalog.movies.len(), 2);
    assert_eq!(decoded.stats.record_abort_offset(), Some(offsets[2]));
    assert_eq!(decoded.stats.end_offset, cut as u64);
}

#[test]
fn garbage_after_last_movie_keeps_complete_movies() {
    let mut bytes = sample_catalog(FormatVersion::new(41), 4);
    bytes.extend_from_slice(&[0xff; 7]);

    let decoded = decode_bytes(bytes, DecoderConfig::default()).unwrap();
    assert_eq!(decoded.catalog.movies.len(), 4);
    assert!(matches!(
        decoded.stats.record_abort.map(|a| a.cause),
        Some(DecodeError::Wire(_))
    ));
}
