/// Implementation of `amc stats`.
///
/// Decodes a catalog and prints the decode counters together with a
/// summary of what the movies carry.
///
/// # Example output
///
/// ```text
/// File:     films.amc  (482133 bytes)
/// Version:  4.2
/// Movies:   118
///
/// Decode
/// ──────────────────────────────────
///   bytes read              482068
///   strings read              2911
///   end offset              482133
///   corrupt extras               0
///
/// Attachments         Count    Bytes
/// ──────────────────────────────────
///   posters             112   401233
///   extras               14
///   extra pictures        9    30211
/// ```
use amc_decoder::DecoderConfig;
use amc_types::Catalog;
use anyhow::Result;

use crate::StatsArgs;

/// Picture counts and payload sizes across a catalog.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct PictureTotals {
    pub posters: usize,
    pub poster_bytes: usize,
    pub extras: usize,
    pub extra_pictures: usize,
    pub extra_picture_bytes: usize,
}

impl PictureTotals {
    pub(crate) fn of(catalog: &Catalog) -> Self {
        let mut totals = Self::default();
        for movie in &catalog.movies {
            if let Some(pic) = &movie.picture {
                totals.posters += 1;
                totals.poster_bytes += pic.size();
            }
            totals.extras += movie.extras.len();
            for pic in movie.extras.iter().filter_map(|e| e.picture.as_ref()) {
                totals.extra_pictures += 1;
                totals.extra_picture_bytes += pic.size();
            }
        }
        totals
    }
}

/// Run the `amc stats` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a catalog.
pub fn run(args: &StatsArgs, config: DecoderConfig) -> Result<()> {
    let decoded = crate::decode_catalog(&args.file, config)?;
    let stats = &decoded.stats;
    let catalog = &decoded.catalog;

    println!(
        "File:     {}  ({} bytes)",
        args.file.display(),
        stats.stream_len
    );
    println!("Version:  {}", catalog.version);
    println!("Movies:   {}", stats.movies_read);
    if catalog.version.has_custom_fields() {
        println!("Fields:   {}", catalog.field_schema.len());
    }

    println!();
    println!("Decode");
    println!("──────────────────────────────────");
    println!("  bytes read        {:>14}", stats.bytes_read);
    println!("  strings read      {:>14}", stats.strings_read);
    println!("  end offset        {:>14}", stats.end_offset);
    println!("  corrupt extras    {:>14}", stats.corrupt_subrecords);
    if let Some(offset) = stats.record_abort_offset() {
        println!("  stream ended at   {offset:>14}");
    }

    let totals = PictureTotals::of(catalog);
    println!();
    println!("Attachments         Count    Bytes");
    println!("──────────────────────────────────");
    println!(
        "  posters        {:>8} {:>8}",
        totals.posters, totals.poster_bytes
    );
    println!("  extras         {:>8}", totals.extras);
    println!(
        "  extra pictures {:>8} {:>8}",
        totals.extra_pictures, totals.extra_picture_bytes
    );

    Ok(())
}
