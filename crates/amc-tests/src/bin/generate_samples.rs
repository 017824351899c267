//! Sample catalog generator.
//!
//! Writes one sample catalog per known format version, plus a few damaged
//! ones, for trying out the `amc` CLI by hand or feeding a fuzzer corpus.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_samples -p amc-tests [-- <output dir>]
//! ```
//!
//! The default output directory is `target/samples` under this crate.
//!
//! # Generated files
//!
//! | File                      | Contents                                  |
//! |---------------------------|-------------------------------------------|
//! | v10.amc ... v42.amc       | 12 sample movies at that version          |
//! | damaged/truncated.amc     | v4.2 sample cut in the middle of movie 5  |
//! | damaged/bad_extras.amc    | v4.2 movie with an extras count of 5000   |
//! | damaged/no_signature.amc  | v4.2 sample without the " AMC_" signature |

#![allow(clippy::pedantic)]

use std::path::{Path, PathBuf};

use amc_fixtures::CatalogWriter;
use amc_tests::{all_versions, sample_movie, sample_schema, sample_writer};
use amc_types::FormatVersion;

const MOVIES: usize = 12;

fn main() {
    let out_dir = std::env::args_os().nth(1).map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/samples"),
        PathBuf::from,
    );

    generate_versions(&out_dir);
    generate_damaged(&out_dir.join("damaged"));

    println!("All sample catalogs written to {}", out_dir.display());
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }
    std::fs::write(path, data).expect("write_file");
    println!("  wrote {} ({} bytes)", path.display(), data.len());
}

// ── Generators ────────────────────────────────────────────────────────────────

fn generate_versions(dir: &Path) {
    for version in all_versions() {
        let bytes = sample_writer(version, MOVIES)
            .encode()
            .expect("sample catalog");
        write_file(&dir.join(format!("v{}.amc", version.raw())), &bytes);
    }
}

fn generate_damaged(dir: &Path) {
    let v42 = FormatVersion::new(42);

    let writer = sample_writer(v42, MOVIES);
    let bytes = writer.encode().expect("sample catalog");
    let cut = usize::try_from(writer.movie_offsets()[4]).expect("offset fits") + 40;
    write_file(&dir.join("truncated.amc"), &bytes[..cut]);

    let mut writer = CatalogWriter::new(v42);
    for field in sample_schema() {
        writer.add_field(field);
    }
    let bytes = writer
        .add_movie(sample_movie(1))
        .add_movie_with_extras_count(sample_movie(2), 5000)
        .add_movie(sample_movie(3))
        .encode()
        .expect("bad extras catalog");
    write_file(&dir.join("bad_extras.amc"), &bytes);

    let mut writer = sample_writer(v42, 3);
    writer.with_header_text("Ant Movie Catalog 4.2");
    let bytes = writer.encode().expect("unsigned catalog");
    write_file(&dir.join("no_signature.amc"), &bytes);
}
