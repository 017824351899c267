/// Implementation of `amc inspect`.
///
/// Decodes a catalog and prints the header, the owner block, the custom
/// field schema and one summary line per movie. `--custom` and `--extras`
/// add indented detail lines; `--movie N` narrows the listing.
///
/// # Output format
///
/// ```text
/// Header: AMC_4.2 Ant Movie Catalog 4.2.0.0 (version 4.2)
/// Owner:  Ann <ann@example.com> http://example.com
/// Fields: 2 custom fields
///   CF1  Studio  ftString
///   CF2  Genre   ftList  default="Drama"
/// Movies: 2
///   #0001 Heat (1995) added 2023-03-15 rating 72 [poster .jpg, 2 extras]
///   #0002 Ronin (1998)
/// ---
/// Movie stream ended at offset 1840: unexpected end of input ...
/// ```
use amc_decoder::DecoderConfig;
use amc_types::{ExtraRecord, FieldDefinition, MovieRecord};
use anyhow::Result;

use crate::InspectArgs;

/// Run the `amc inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a catalog.
pub fn run(args: &InspectArgs, config: DecoderConfig) -> Result<()> {
    let decoded = crate::decode_catalog(&args.file, config)?;
    let catalog = &decoded.catalog;
    let props = &decoded.properties;

    println!("Header: {} (version {})", catalog.header, catalog.version);
    println!("Owner:  {}", owner_line(&props.owner_name, &props.owner_mail, &props.owner_site));
    if !props.description.is_empty() {
        println!("        {}", props.description);
    }

    if catalog.version.has_custom_fields() {
        println!(
            "Fields: {} custom field{}",
            catalog.field_schema.len(),
            plural(catalog.field_schema.len())
        );
        for def in &catalog.field_schema {
            println!("  {}", field_line(def));
        }
    }

    println!("Movies: {}", catalog.movies.len());
    let selected = catalog
        .movies
        .iter()
        .filter(|m| args.movie.is_none_or(|n| m.number == n));
    for movie in selected {
        println!("  {}", movie_line(movie));

        if args.custom {
            for (tag, value) in movie.custom_values.iter() {
                println!("      {tag} = {value:?}");
            }
        }
        if args.extras {
            for (i, extra) in movie.extras.iter().enumerate() {
                println!("      extra {}: {}", i + 1, extra_line(extra));
            }
        }
    }

    if let Some(abort) = &decoded.stats.record_abort {
        println!("---");
        println!("Movie stream ended at offset {}: {}", abort.offset, abort.cause);
    }

    Ok(())
}

// ── Line formatting ───────────────────────────────────────────────────────────

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn owner_line(name: &str, mail: &str, site: &str) -> String {
    let mut line = if name.is_empty() {
        "(none)".to_string()
    } else {
        name.to_string()
    };
    if !mail.is_empty() {
        line.push_str(&format!(" <{mail}>"));
    }
    if !site.is_empty() {
        line.push(' ');
        line.push_str(site);
    }
    line
}

fn field_line(def: &FieldDefinition) -> String {
    let mut line = format!("{}  {}  {}", def.tag, def.name, def.field_type);
    if !def.default_value.is_empty() {
        line.push_str(&format!("  default={:?}", def.default_value));
    }
    line
}

/// One-line movie summary: number, title, year, dates, rating, and a
/// bracketed note of attached pictures and extras.
pub(crate) fn movie_line(movie: &MovieRecord) -> String {
    let mut line = format!("#{:04} {}", movie.number, movie.display_title());
    if movie.year > 0 {
        line.push_str(&format!(" ({})", movie.year));
    }
    if movie.date_added > 0
        && let Some(date) = movie.date_added_civil()
    {
        line.push_str(&format!(" added {date}"));
    }
    if movie.rating >= 0 {
        line.push_str(&format!(" rating {}", movie.rating));
    }

    let mut notes = Vec::new();
    if let Some(pic) = &movie.picture {
        let ext = if pic.extension.is_empty() { "?" } else { &pic.extension };
        notes.push(format!("poster {ext}"));
    }
    if !movie.extras.is_empty() {
        notes.push(format!("{} extra{}", movie.extras.len(), plural(movie.extras.len())));
    }
    if !notes.is_empty() {
        line.push_str(&format!(" [{}]", notes.join(", ")));
    }
    line
}

fn extra_line(extra: &ExtraRecord) -> String {
    let title = if extra.title.is_empty() { "(untitled)" } else { &extra.title };
    let mut line = title.to_string();
    if !extra.category.is_empty() {
        line.push_str(&format!(" [{}]", extra.category));
    }
    if !extra.url.is_empty() {
        line.push_str(&format!(" {}", extra.url));
    }
    if let Some(pic) = &extra.picture {
        line.push_str(&format!(" ({} byte picture)", pic.size()));
    }
    line
}
