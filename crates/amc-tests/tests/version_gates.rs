//! Per-version layout checks.
//!
//! The same logical movie is written at every known format version and
//! decoded again. Fields a version does not carry must come back at their
//! defaults; fields it does carry must survive unchanged, apart from the
//! rating and colour-tag normalisation.

use amc_decoder::{DecoderConfig, decode_bytes};
use amc_fixtures::{CatalogWriter, SchemaField};
use amc_tests::{all_versions, expected_after_decode, sample_movie, sample_writer};
use amc_types::{CustomValues, FormatVersion, MovieRecord};

fn round_trip(version: FormatVersion, movie: MovieRecord) -> MovieRecord {
    let bytes = CatalogWriter::new(version).add_movie(movie).encode().unwrap();
    let mut decoded = decode_bytes(bytes, DecoderConfig::default()).unwrap();
    assert_eq!(decoded.catalog.movies.len(), 1, "version {version}");
    decoded.catalog.movies.remove(0)
}

fn without_custom_values(i: usize) -> MovieRecord {
    MovieRecord {
        custom_values: CustomValues::default(),
        ..sample_movie(i)
    }
}

#[test]
fn fields_appear_at_their_versions() {
    for version in all_versions() {
        let written = without_custom_values(0);
        let decoded = round_trip(version, written.clone());

        assert_eq!(decoded, expected_after_decode(version, &written), "version {version}");
        assert_eq!(
            decoded.media_type.is_empty(),
            !version.has_media_type(),
            "version {version}"
        );
        assert_eq!(
            decoded.writer.is_empty(),
            !version.has_extras(),
            "version {version}"
        );
        assert_eq!(
            decoded.extras.is_empty(),
            !version.has_extras(),
            "version {version}"
        );
    }
}

#[test]
fn layouts_differ_between_gates() {
    let sizes: Vec<usize> = all_versions()
        .map(|v| {
            CatalogWriter::new(v)
                .add_movie(without_custom_values(1))
                .add_movie(without_custom_values(2))
                .encode()
                .unwrap()
                .len()
        })
        .collect();

    // 3.2 and 3.3 differ by media type and source; 3.4 and 3.5 by the
    // owner ICQ string only.
    assert!(sizes[1] < sizes[2]);
    assert!(sizes[3] > sizes[4]);
    assert!(sizes[6] < sizes[7]);
}

// ── Rating ────────────────────────────────────────────────────────────────────

#[test]
fn legacy_ratings_are_scaled() {
    for (version, stored, expected) in [(34, 7, 70), (34, -1, -1), (34, 0, 0), (35, 7, 7), (42, 85, 85)]
    {
        let movie = MovieRecord {
            number: 1,
            rating: stored,
            ..MovieRecord::default()
        };
        let decoded = round_trip(FormatVersion::new(version), movie);
        assert_eq!(decoded.rating, expected, "version {version}, stored {stored}");
    }
}

// ── Colour tag ────────────────────────────────────────────────────────────────

#[test]
fn colour_tag_is_wrapped_from_41() {
    for (stored, expected) in [(0, 0), (12, 12), (13, 0), (27, 1), (-1, 12)] {
        let movie = MovieRecord {
            number: 1,
            color_tag: stored,
            ..MovieRecord::default()
        };
        let decoded = round_trip(FormatVersion::new(41), movie);
        assert_eq!(decoded.color_tag, expected, "stored {stored}");
    }
}

#[test]
fn colour_tag_absent_before_41() {
    let movie = MovieRecord {
        number: 1,
        color_tag: 5,
        ..MovieRecord::default()
    };
    assert_eq!(round_trip(FormatVersion::new(40), movie).color_tag, 0);
}

// ── Custom fields ─────────────────────────────────────────────────────────────

#[test]
fn custom_values_follow_schema_order() {
    for version in all_versions().filter(|v| v.has_custom_fields()) {
        let bytes = sample_writer(version, 5).encode().unwrap();
        let decoded = decode_bytes(bytes, DecoderConfig::default()).unwrap();
        let schema = &decoded.catalog.field_schema;

        assert_eq!(schema.len(), 3, "version {version}");
        for (i, movie) in decoded.catalog.movies.iter().enumerate() {
            assert_eq!(movie.custom_values.len(), schema.len());
            assert_eq!(movie.custom_values.get("CF1"), Some(format!("Studio {}", i % 4).as_str()));
            assert_eq!(movie.custom_values.get("CF2"), Some(["A", "B", "C"][i % 3]));
        }
    }
}

#[test]
fn schema_without_movies() {
    let bytes = CatalogWriter::new(FormatVersion::new(41))
        .add_field(SchemaField::new("CF1", "Region", "ftList", "").with_list_values(["EU", "US"]))
        .add_field(SchemaField::new("CF2", "Notes", "ftText", ""))
        .encode()
        .unwrap();
    let decoded = decode_bytes(bytes, DecoderConfig::default()).unwrap();

    let tags: Vec<_> = decoded.catalog.field_schema.iter().map(|f| f.tag.as_str()).collect();
    assert_eq!(tags, ["CF1", "CF2"]);
    assert!(decoded.catalog.field("CF1").unwrap().is_list());
    assert!(decoded.catalog.movies.is_empty());
}

#[test]
fn schema_is_ignored_before_40() {
    let bytes = CatalogWriter::new(FormatVersion::new(35))
        .add_field(SchemaField::new("CF1", "Studio", "ftString", ""))
        .add_movie(MovieRecord {
            number: 1,
            ..MovieRecord::default()
        })
        .encode()
        .unwrap();
    let decoded = decode_bytes(bytes, DecoderConfig::default()).unwrap();
    assert!(decoded.catalog.field_schema.is_empty());
    assert!(decoded.catalog.movies[0].custom_values.is_empty());
}

// ── Extras ────────────────────────────────────────────────────────────────────

#[test]
fn extras_limit_is_configurable() {
    let movie = sample_movie(0);
    assert_eq!(movie.extras.len(), 2);
    let bytes = sample_writer(FormatVersion::new(42), 1).encode().unwrap();

    let lenient = decode_bytes(bytes.clone(), DecoderConfig::default()).unwrap();
    assert_eq!(lenient.catalog.movies[0].extras.len(), 2);

    let strict = decode_bytes(
        bytes,
        DecoderConfig {
            max_extras: 1,
            ..DecoderConfig::default()
        },
    )
    .unwrap();
    // The count is rejected before any extra body is read. Whatever the
    // stream makes of the bodies afterwards, the first movie keeps its
    // own fields.
    let first = &strict.catalog.movies[0];
    assert!(first.extras.is_empty());
    assert_eq!(first.original_title, movie.original_title);
    assert!(strict.stats.corrupt_subrecords >= 1);
}

#[test]
fn zero_extras_count_is_an_empty_list() {
    let bytes = CatalogWriter::new(FormatVersion::new(42))
        .add_movie_with_extras_count(
            MovieRecord {
                number: 9,
                ..MovieRecord::default()
            },
            0,
        )
        .encode()
        .unwrap();
    let decoded = decode_bytes(bytes, DecoderConfig::default()).unwrap();
    assert!(decoded.catalog.movies[0].extras.is_empty());
    assert_eq!(decoded.stats.corrupt_subrecords, 0);
}
