//! Sample catalogs shared by the integration tests, the benches and the
//! sample generator.
//!
//! Every sample is deterministic: the same arguments always produce the
//! same bytes.

#![allow(clippy::pedantic)]

use amc_fixtures::{CatalogWriter, SchemaField};
use amc_types::{
    CatalogProperties, CustomValues, ExtraRecord, FieldDefinition, FormatVersion, MovieRecord,
    Picture,
};

/// Versions the format is known to have shipped with a distinct layout.
pub const LAYOUT_VERSIONS: [u32; 7] = [10, 32, 33, 34, 35, 40, 41];

/// All layouts, including the current one.
pub fn all_versions() -> impl Iterator<Item = FormatVersion> {
    LAYOUT_VERSIONS
        .into_iter()
        .chain(std::iter::once(42))
        .map(FormatVersion::new)
}

pub fn sample_properties() -> CatalogProperties {
    CatalogProperties {
        owner_name: "Ann Example".into(),
        owner_mail: "ann@example.com".into(),
        owner_site: "http://example.com/films".into(),
        description: "Films on the living room shelf".into(),
    }
}

/// Three custom fields: a plain string, a list and a boolean.
pub fn sample_schema() -> Vec<SchemaField> {
    vec![
        SchemaField::new("CF1", "Studio", "ftString", ""),
        SchemaField::new("CF2", "Shelf", "ftList", "A")
            .with_list_values(["A", "B", "C"]),
        SchemaField::new("CF3", "Seen in cinema", "ftBoolean", "False"),
    ]
}

pub fn sample_definitions() -> Vec<FieldDefinition> {
    sample_schema().into_iter().map(|f| f.definition).collect()
}

const TITLES: [&str; 6] = [
    "Heat",
    "Ronin",
    "Le Samouraï",
    "Chungking Express",
    "Alien",
    "Stalker",
];

/// Movie `i` of a sample catalog.
///
/// Fields that only exist in later versions are always filled in; the
/// writer leaves out whatever the target version lacks. Every third movie
/// has a poster and every fourth carries two extras.
pub fn sample_movie(i: usize) -> MovieRecord {
    let number = i32::try_from(i + 1).unwrap();
    let title = TITLES[i % TITLES.len()];
    let values = vec![
        format!("Studio {}", i % 4),
        ["A", "B", "C"][i % 3].to_string(),
        (i % 2 == 0).to_string(),
    ];

    MovieRecord {
        number,
        date_added: 40_000 + number,
        date_watched: if i % 2 == 0 { 41_000 + number } else { 0 },
        user_rating: number % 100,
        rating: number % 10,
        year: 1960 + number % 60,
        length: 90 + number % 60,
        video_bitrate: 1500,
        audio_bitrate: 192,
        disks: 1,
        color_tag: number % 13,
        checked: i % 5 != 0,
        media: format!("DVD-{number:03}"),
        media_type: "DVD".into(),
        source: "Shop".into(),
        borrower: String::new(),
        original_title: title.into(),
        translated_title: format!("{title} (translated)"),
        director: "Someone".into(),
        producer: "Someone Else".into(),
        writer: "A Writer".into(),
        composer: "A Composer".into(),
        country: "France".into(),
        category: "Drama".into(),
        certification: "PG".into(),
        actors: "First Actor, Second Actor".into(),
        url: format!("http://example.com/films/{number}"),
        description: "A long description of the plot. ".repeat(3),
        comments: String::new(),
        file_path: format!("D:\\Films\\{number}.mkv"),
        video_format: "XviD".into(),
        audio_format: "MP3".into(),
        resolution: "720x576".into(),
        framerate: "25".into(),
        languages: "French".into(),
        subtitles: "English".into(),
        size: "700".into(),
        picture: (i % 3 == 0).then(|| sample_picture(&format!("covers\\{number}.jpg"), 256 + i)),
        custom_values: CustomValues::zip(&sample_definitions(), values),
        extras: if i % 4 == 0 {
            vec![sample_extra(number, 1), sample_extra(number, 2)]
        } else {
            Vec::new()
        },
    }
}

fn sample_extra(number: i32, n: i32) -> ExtraRecord {
    ExtraRecord {
        checked: n == 1,
        tag: format!("X{n}"),
        title: format!("Extra {n}"),
        category: "Trailer".into(),
        url: format!("http://example.com/films/{number}/extra/{n}"),
        description: String::new(),
        comments: String::new(),
        created_by: "Ann".into(),
        picture: (n == 1).then(|| sample_picture("still.png", 64)),
    }
}

fn sample_picture(path: &str, len: usize) -> Picture {
    let bytes = (0..len).map(|b| (b % 251) as u8).collect();
    Picture::new(path.into(), bytes)
}

/// A writer holding `movies` sample movies at `version`.
///
/// Custom fields are attached from 4.0 on, matching what the writer
/// requires.
pub fn sample_writer(version: FormatVersion, movies: usize) -> CatalogWriter {
    let mut writer = CatalogWriter::new(version);
    writer.with_properties(sample_properties());

    let custom = version.has_custom_fields();
    if custom {
        for field in sample_schema() {
            writer.add_field(field);
        }
    }
    for i in 0..movies {
        let mut movie = sample_movie(i);
        if !custom {
            movie.custom_values = CustomValues::default();
        }
        writer.add_movie(movie);
    }
    writer
}

/// Encoded sample catalog.
pub fn sample_catalog(version: FormatVersion, movies: usize) -> Vec<u8> {
    sample_writer(version, movies)
        .encode()
        .expect("sample catalog is well formed")
}

/// What a movie written at `version` looks like after decoding: fields
/// the version lacks are at their defaults, and the rating and colour tag
/// are normalised the way the decoder does.
pub fn expected_after_decode(version: FormatVersion, movie: &MovieRecord) -> MovieRecord {
    let mut m = movie.clone();
    if !version.has_extras() {
        m.date_watched = 0;
        m.user_rating = 0;
        m.writer.clear();
        m.composer.clear();
        m.certification.clear();
        m.file_path.clear();
        m.extras.clear();
    }
    if !version.has_extended_fields() {
        m.color_tag = 0;
    } else {
        m.color_tag = m.color_tag.rem_euclid(13);
    }
    if !version.has_media_type() {
        m.media_type.clear();
        m.source.clear();
    }
    if !version.has_custom_fields() {
        m.custom_values = CustomValues::default();
    }
    if version.has_legacy_rating_scale() && m.rating != -1 {
        m.rating *= 10;
    }
    m
}
