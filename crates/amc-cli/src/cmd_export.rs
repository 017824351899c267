/// Implementation of `amc export`.
///
/// Writes the decoded catalog as one JSON document: the catalog fields
/// at the top level plus the owner `properties` and the decode `stats`.
/// Picture payloads are replaced by their size.
///
/// ```json
/// {
///   "version": 42,
///   "header": "AMC_4.2 Ant Movie Catalog 4.2.0.0",
///   "field_schema": [ { "tag": "CF1", "name": "Studio", ... } ],
///   "movies": [ { "number": 1, "picture": { "path": "heat.jpg", "size": 4812, ... } } ],
///   "properties": { "owner_name": "Ann", ... },
///   "stats": { "movies_read": 1, "record_abort_offset": null, ... }
/// }
/// ```
use std::fs::File;
use std::io::{self, BufWriter, Write};

use amc_decoder::{DecodeStats, DecoderConfig};
use amc_types::{Catalog, CatalogProperties};
use anyhow::{Context, Result};
use serde::Serialize;

use crate::ExportArgs;

#[derive(Serialize)]
pub(crate) struct ExportDocument<'a> {
    #[serde(flatten)]
    pub catalog: &'a Catalog,
    pub properties: &'a CatalogProperties,
    pub stats: ExportStats,
}

/// Serializable view of [`DecodeStats`]; the abort cause is rendered as
/// its message.
#[derive(Serialize)]
pub(crate) struct ExportStats {
    pub bytes_read: u64,
    pub strings_read: u64,
    pub movies_read: u64,
    pub corrupt_subrecords: u64,
    pub stream_len: u64,
    pub end_offset: u64,
    pub record_abort_offset: Option<u64>,
    pub record_abort_reason: Option<String>,
}

impl From<&DecodeStats> for ExportStats {
    fn from(stats: &DecodeStats) -> Self {
        Self {
            bytes_read: stats.bytes_read,
            strings_read: stats.strings_read,
            movies_read: stats.movies_read,
            corrupt_subrecords: stats.corrupt_subrecords,
            stream_len: stats.stream_len,
            end_offset: stats.end_offset,
            record_abort_offset: stats.record_abort_offset(),
            record_abort_reason: stats.record_abort.as_ref().map(|a| a.cause.to_string()),
        }
    }
}

/// Run the `amc export` command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be decoded or the output cannot
/// be written.
pub fn run(args: &ExportArgs, config: DecoderConfig) -> Result<()> {
    let decoded = crate::decode_catalog(&args.file, config)?;
    let doc = ExportDocument {
        catalog: &decoded.catalog,
        properties: &decoded.properties,
        stats: ExportStats::from(&decoded.stats),
    };

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_json(&mut out, &doc, args.pretty)?;
            out.flush()
                .with_context(|| format!("cannot write {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_json(&mut out, &doc, args.pretty)?;
        }
    }
    Ok(())
}

fn write_json<W: Write>(out: &mut W, doc: &ExportDocument<'_>, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, doc)?;
    } else {
        serde_json::to_writer(&mut *out, doc)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use amc_types::{FormatVersion, MovieRecord, Picture};

    #[test]
    fn export_shape() {
        let catalog = Catalog {
            version: FormatVersion::new(42),
            header: "AMC_4.2".into(),
            field_schema: Vec::new(),
            movies: vec![MovieRecord {
                number: 1,
                picture: Some(Picture::new("heat.jpg".into(), vec![0; 12])),
                ..MovieRecord::default()
            }],
        };
        let props = CatalogProperties {
            owner_name: "Ann".into(),
            ..CatalogProperties::default()
        };
        let doc = ExportDocument {
            catalog: &catalog,
            properties: &props,
            stats: ExportStats::from(&DecodeStats::default()),
        };

        let mut buf = Vec::new();
        write_json(&mut buf, &doc, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["version"], 42);
        assert_eq!(value["header"], "AMC_4.2");
        assert_eq!(value["properties"]["owner_name"], "Ann");
        assert_eq!(value["movies"][0]["picture"]["size"], 12);
        assert_eq!(value["movies"][0]["picture"]["extension"], ".jpg");
        assert!(value["stats"]["record_abort_offset"].is_null());
    }
}
