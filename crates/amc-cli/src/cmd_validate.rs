/// Implementation of `amc validate`.
///
/// Runs a full decode and reports each stage with a checkmark (`✓`), a
/// warning (`!`) or a failure (`✗`). The command exits with code 0 when
/// the catalog decodes and code 1 on a fatal error. With `--strict`, a
/// movie stream that ends before the end of the file also fails.
///
/// # Success output
///
/// ```text
/// ✓ Header: AMC_4.2 Ant Movie Catalog 4.2.0.0 (version 4.2)
/// ✓ Properties: owner "Ann"
/// ✓ Schema: 2 custom fields
/// ✓ Movies: 118 movies decoded
/// ✓ Coverage: all 482133 bytes consumed
/// ```
///
/// # Partial output
///
/// ```text
/// ✓ Movies: 117 movies decoded
/// ! Coverage: movie stream ended at offset 480012 of 482133
///             invalid length -3 at offset 480012 (limit 10000000)
/// ! Extras: 1 movie had a corrupt extras list
/// ```
use amc_decoder::{DecodeError, DecodeStats, DecoderConfig};
use anyhow::{Result, anyhow};

use crate::ValidateArgs;

/// Run the `amc validate` command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be decoded, or under
/// `--strict` if the movie stream ended early.
pub fn run(args: &ValidateArgs, config: DecoderConfig) -> Result<()> {
    let decoded = match amc_decoder::decode_file(&args.file, config) {
        Ok(decoded) => decoded,
        Err(e) => {
            println!("✗ Error: {}", decode_error_diagnostic(&e));
            return Err(anyhow!("validation failed"));
        }
    };

    let catalog = &decoded.catalog;
    println!("✓ Header: {} (version {})", catalog.header, catalog.version);
    println!("✓ Properties: owner {:?}", decoded.properties.owner_name);
    if catalog.version.has_custom_fields() {
        let n = catalog.field_schema.len();
        println!("✓ Schema: {n} custom field{}", if n == 1 { "" } else { "s" });
    }
    let n = catalog.movies.len();
    println!("✓ Movies: {n} movie{} decoded", if n == 1 { "" } else { "s" });

    let complete = report_coverage(&decoded.stats);

    if decoded.stats.corrupt_subrecords > 0 {
        println!(
            "! Extras: {} movie{} had a corrupt extras list",
            decoded.stats.corrupt_subrecords,
            if decoded.stats.corrupt_subrecords == 1 { "" } else { "s" }
        );
    }

    if args.strict && !complete {
        return Err(anyhow!("movie stream ended before end of file"));
    }
    Ok(())
}

/// Print the coverage line. Returns whether the whole file was consumed.
fn report_coverage(stats: &DecodeStats) -> bool {
    match &stats.record_abort {
        None => {
            println!("✓ Coverage: all {} bytes consumed", stats.stream_len);
            true
        }
        Some(abort) => {
            println!(
                "! Coverage: movie stream ended at offset {} of {}",
                abort.offset, stats.stream_len
            );
            println!("            {}", abort.cause);
            false
        }
    }
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Converts a fatal `DecodeError` into a one-line diagnostic.
///
/// ```text
/// ┌──────────────────────┬────────────────────────────────────────────┐
/// │ DecodeError variant  │ Diagnostic message                         │
/// ├──────────────────────┼────────────────────────────────────────────┤
/// │ InvalidHeader        │ "not an AMC catalog: <inner error>"        │
/// │ Wire (I/O)           │ "cannot read file: <inner error>"          │
/// │ Wire (format)        │ "catalog properties or schema damaged: …"  │
/// │ CorruptSubrecord     │ "<error Display>"                          │
/// └──────────────────────┴────────────────────────────────────────────┘
/// ```
fn decode_error_diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::InvalidHeader(inner) => format!("not an AMC catalog: {inner}"),
        DecodeError::Wire(inner) if !inner.is_format_error() => {
            format!("cannot read file: {inner}")
        }
        DecodeError::Wire(inner) => format!("catalog properties or schema damaged: {inner}"),
        other @ DecodeError::CorruptSubrecord { .. } => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amc_wire::WireError;

    #[test]
    fn header_diagnostic() {
        let e = DecodeError::InvalidHeader(WireError::InvalidFormat {
            offset: 0,
            reason: "missing \" AMC_\" signature".into(),
        });
        assert_eq!(
            decode_error_diagnostic(&e),
            "not an AMC catalog: invalid format at offset 0: missing \" AMC_\" signature"
        );
    }

    #[test]
    fn io_diagnostic() {
        let e = DecodeError::Wire(WireError::Io(std::io::Error::other("denied")));
        assert_eq!(decode_error_diagnostic(&e), "cannot read file: denied");
    }

    #[test]
    fn properties_diagnostic() {
        let e = DecodeError::Wire(WireError::UnexpectedEof {
            offset: 81,
            needed: 100,
            available: 69,
        });
        assert_eq!(
            decode_error_diagnostic(&e),
            "catalog properties or schema damaged: unexpected end of input at offset 81: needed 100 bytes, got 69"
        );
    }
}
