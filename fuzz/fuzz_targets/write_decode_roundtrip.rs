#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use amc_decoder::{decode_bytes, DecoderConfig};
use amc_fixtures::CatalogWriter;
use amc_types::{FormatVersion, MovieRecord, Picture};

#[derive(Debug, Arbitrary)]
struct FuzzMovie {
    number: i32,
    rating: i8,
    year: i16,
    checked: bool,
    original_title: Vec<u8>,
    comments: Vec<u8>,
    picture: Option<(Vec<u8>, Vec<u8>)>,
}

#[derive(Debug, Arbitrary)]
struct FuzzCatalog {
    version_id: u8,
    movies: Vec<FuzzMovie>,
}

const VERSIONS: [u32; 8] = [10, 32, 33, 34, 35, 40, 41, 42];

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

// Fuzz target: CatalogWriter -> decode_bytes roundtrip.
//
// Builds a catalog from arbitrary movies, encodes it and asserts that
// every movie decodes back with its fields intact.
fuzz_target!(|input: FuzzCatalog| {
    let version = FormatVersion::new(VERSIONS[input.version_id as usize % VERSIONS.len()]);

    let movies: Vec<MovieRecord> = input
        .movies
        .iter()
        .take(64)
        .map(|m| MovieRecord {
            number: m.number,
            rating: i32::from(m.rating),
            year: i32::from(m.year),
            checked: m.checked,
            original_title: latin1(&m.original_title),
            comments: latin1(&m.comments),
            picture: m
                .picture
                .as_ref()
                .filter(|(_, bytes)| !bytes.is_empty())
                .map(|(path, bytes)| Picture::new(latin1(path), bytes.clone())),
            ..MovieRecord::default()
        })
        .collect();

    let mut writer = CatalogWriter::new(version);
    for movie in &movies {
        writer.add_movie(movie.clone());
    }
    let bytes = writer.encode().unwrap();

    let decoded = decode_bytes(bytes, DecoderConfig::default()).unwrap();
    assert!(decoded.catalog.movies.len() >= movies.len());

    for (written, read) in movies.iter().zip(&decoded.catalog.movies) {
        assert_eq!(read.number, written.number);
        assert_eq!(read.original_title, written.original_title);
        assert_eq!(read.comments, written.comments);
        assert_eq!(read.checked, written.checked);
        assert_eq!(read.picture, written.picture);
        if !version.has_legacy_rating_scale() || written.rating == -1 {
            assert_eq!(read.rating, written.rating);
        } else {
            assert_eq!(read.rating, written.rating * 10);
        }
    }
});
