use amc_types::{CatalogProperties, FormatVersion};
use amc_wire::{CatalogSource, CursorReader};
use log::info;

use crate::error::DecodeError;

/// Decode the catalog properties block at the start of the payload.
///
/// ```text
///   owner_name │ owner_mail │ [icq]³⁴ │ owner_site │ description
/// ```
///
/// The ICQ identifier only exists before version 3.5 and is discarded.
///
/// # Errors
///
/// Any primitive read failure. Fatal to the decode.
pub fn decode_properties<S: CatalogSource>(
    reader: &mut CursorReader<S>,
    version: FormatVersion,
) -> Result<CatalogProperties, DecodeError> {
    let owner_name = reader.read_string("owner_name")?;
    let owner_mail = reader.read_string("owner_mail")?;
    if version.has_owner_icq() {
        reader.read_string("icq_field_deprecated")?;
    }
    let properties = CatalogProperties {
        owner_name,
        owner_mail,
        owner_site: reader.read_string("owner_site")?,
        description: reader.read_string("description")?,
    };

    info!("catalog owner: {:?}", properties.owner_name);
    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use amc_fixtures::PayloadWriter;
    use amc_wire::MemorySource;

    fn props() -> CatalogProperties {
        CatalogProperties {
            owner_name: "Ann".into(),
            owner_mail: "ann@example.com".into(),
            owner_site: "http://example.com".into(),
            description: "My films".into(),
        }
    }

    #[test]
    fn reads_v35_properties() {
        let mut w = PayloadWriter::new();
        w.properties(FormatVersion::new(35), &props());
        let mut r = CursorReader::new(MemorySource::new(w.into_file_bytes()));
        assert_eq!(decode_properties(&mut r, FormatVersion::new(35)).unwrap(), props());
    }

    #[test]
    fn skips_icq_before_35() {
        let mut w = PayloadWriter::new();
        w.string("Ann")
            .string("ann@example.com")
            .string("123456")
            .string("http://example.com")
            .string("My films");
        let mut r = CursorReader::new(MemorySource::new(w.into_file_bytes()));
        assert_eq!(decode_properties(&mut r, FormatVersion::new(34)).unwrap(), props());
    }
}
