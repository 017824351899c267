#![no_main]

use libfuzzer_sys::fuzz_target;
use amc_decoder::{decode_bytes, DecodeError, DecoderConfig};
use amc_types::FormatVersion;

// Fuzz target: payload decoding behind a valid header.
//
// Input format:
//   byte 0: selects one of the known format versions
//   bytes 1..: payload appended at offset 65
//
// Catches bugs in:
// - Properties, schema and movie field gating
// - Extras count range checks
// - Recovery at the first damaged movie record
const VERSIONS: [u32; 8] = [10, 32, 33, 34, 35, 40, 41, 42];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, payload)) = data.split_first() else {
        return;
    };
    let version = FormatVersion::new(VERSIONS[selector as usize % VERSIONS.len()]);

    let mut bytes = amc_fixtures::CatalogWriter::default_header_text(version).into_bytes();
    bytes.resize(65, 0);
    bytes.extend_from_slice(payload);
    bytes.resize(bytes.len().max(100), 0);
    let len = bytes.len() as u64;

    match decode_bytes(bytes, DecoderConfig::default()) {
        Ok(decoded) => {
            assert_eq!(decoded.catalog.version, version);
            assert!(decoded.stats.end_offset <= len);
            for movie in &decoded.catalog.movies {
                assert_eq!(movie.custom_values.len(), decoded.catalog.field_schema.len());
                assert!((0..13).contains(&movie.color_tag));
                if let Some(pic) = &movie.picture {
                    assert!(pic.size() > 0);
                }
            }
        }
        Err(DecodeError::InvalidHeader(e)) => panic!("valid header rejected: {e}"),
        Err(_) => {}
    }
});
