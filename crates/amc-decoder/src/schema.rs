use amc_types::{FieldDefinition, FormatVersion};
use amc_wire::{CatalogSource, CursorReader};
use log::{debug, info};

use crate::error::DecodeError;

/// Size of the opaque multi-value separator blob in extended schemas.
const SEPARATOR_BLOB_LEN: u64 = 4;

/// Decode the custom-field schema that follows the properties block.
///
/// Only present when [`FormatVersion::has_custom_fields`] holds; the
/// caller checks the gate. The block opens with two opaque strings
/// (column settings and GUI properties) and a field count. Each field is
/// laid out as follows, with `*` marking attributes that only exist from
/// version 4.1 on:
///
/// ```text
///   tag │ name │ ext* │ type │ default │ media-info* │ multi (bool)
///       │ separator* (4 bytes) │ rmp* (bool) │ patch* (bool)
///       │ excluded (bool) │ gui (string)
///   if type == "ftList":
///       count (int32) │ count × string
///       │ auto-add* │ sort* │ auto-complete* │ use-catalog* (bools)
/// ```
///
/// Only tag, name, type and default value are kept. The order of the
/// returned definitions is the order custom values appear in every movie.
/// A negative field or list-value count reads as zero entries.
///
/// # Errors
///
/// Any primitive read failure. A failure here is fatal to the decode: the
/// cursor cannot be trusted to be positioned at the first movie.
pub fn decode_schema<S: CatalogSource>(
    reader: &mut CursorReader<S>,
    version: FormatVersion,
) -> Result<Vec<FieldDefinition>, DecodeError> {
    let column_settings = reader.read_string("column_settings")?;
    let gui_properties = reader.read_string("gui_properties")?;
    info!(
        "custom field block: column settings {} chars, GUI properties {} chars",
        column_settings.chars().count(),
        gui_properties.chars().count()
    );

    let count = reader.read_i32("custom_fields_count")?;
    let count = usize::try_from(count).unwrap_or(0);
    let mut fields = Vec::with_capacity(count.min(256));

    for i in 0..count {
        debug!("reading custom field {}/{count} at offset {}", i + 1, reader.offset());
        fields.push(decode_field(reader, version)?);
    }

    info!("decoded {} custom field definitions", fields.len());
    Ok(fields)
}

fn decode_field<S: CatalogSource>(
    reader: &mut CursorReader<S>,
    version: FormatVersion,
) -> Result<FieldDefinition, DecodeError> {
    let extended = version.has_extended_fields();

    let tag = reader.read_string("field_tag")?;
    let name = reader.read_string("field_name")?;
    if extended {
        reader.read_string("field_ext")?;
    }
    let field_type = reader.read_string("field_type")?;
    let default_value = reader.read_string("default_value")?;
    if extended {
        reader.read_string("media_info")?;
    }

    reader.read_bool("multi_values")?;
    if extended {
        reader.read_bytes(SEPARATOR_BLOB_LEN, "multi_values_sep")?;
        reader.read_bool("multi_values_rmp")?;
        reader.read_bool("multi_values_patch")?;
    }
    reader.read_bool("excluded_in_scripts")?;
    reader.read_string("gui_properties_field")?;

    let definition = FieldDefinition {
        tag,
        name,
        field_type,
        default_value,
    };

    if definition.is_list() {
        let values = reader.read_i32("list_values_count")?;
        debug!("field {:?} is a list with {values} values", definition.tag);
        for _ in 0..values.max(0) {
            reader.read_string("list_value")?;
        }
        if extended {
            reader.read_bool("list_auto_add")?;
            reader.read_bool("list_sort")?;
            reader.read_bool("list_auto_complete")?;
            reader.read_bool("list_use_catalog_values")?;
        }
    }

    Ok(definition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use amc_fixtures::{PayloadWriter, SchemaField};
    use amc_wire::{MemorySource, WireError};

    fn decode(
        payload: PayloadWriter,
        version: u32,
    ) -> (Result<Vec<FieldDefinition>, DecodeError>, u64) {
        let bytes = payload.into_file_bytes();
        let len = bytes.len() as u64;
        let mut reader = CursorReader::new(MemorySource::new(bytes));
        let result = decode_schema(&mut reader, FormatVersion::new(version));
        assert!(result.is_err() || reader.offset() == len, "schema left unread bytes");
        (result, reader.offset())
    }

    fn fields() -> Vec<SchemaField> {
        vec![
            SchemaField::new("CF1", "Studio", "ftString", "n/a"),
            SchemaField::new("CF2", "Genre", "ftList", "")
                .with_list_values(["Drama", "Comedy", "Horror"]),
            SchemaField::new("CF3", "Seen twice", "ftBoolean", "False"),
        ]
    }

    #[test]
    fn empty_schema() {
        let mut w = PayloadWriter::new();
        w.schema(FormatVersion::new(40), &[]);
        let (result, _) = decode(w, 40);
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn v40_schema_keeps_file_order() {
        let mut w = PayloadWriter::new();
        w.schema(FormatVersion::new(40), &fields());
        let defs = decode(w, 40).0.unwrap();

        let tags: Vec<_> = defs.iter().map(|d| d.tag.as_str()).collect();
        assert_eq!(tags, vec!["CF1", "CF2", "CF3"]);
        assert_eq!(defs[0].name, "Studio");
        assert_eq!(defs[0].default_value, "n/a");
        assert!(defs[1].is_list());
        assert_eq!(defs[2].field_type, "ftBoolean");
    }

    #[test]
    fn v41_extended_attributes_are_consumed() {
        let mut w = PayloadWriter::new();
        w.schema(FormatVersion::new(41), &fields());
        w.i32(1234);
        let bytes = w.into_file_bytes();
        let mut reader = CursorReader::new(MemorySource::new(bytes));

        let defs = decode_schema(&mut reader, FormatVersion::new(41)).unwrap();
        assert_eq!(defs.len(), 3);
        assert_eq!(defs[1].name, "Genre");
        assert_eq!(reader.read_i32("sentinel").unwrap(), 1234);
    }

    #[test]
    fn negative_count_is_empty() {
        let mut w = PayloadWriter::new();
        w.string("").string("").i32(-3);
        let (result, _) = decode(w, 40);
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn truncated_schema_fails() {
        let mut w = PayloadWriter::new();
        w.string("").string("").i32(2).string("CF1");
        let bytes = w.into_file_bytes();
        let mut reader = CursorReader::new(MemorySource::new(bytes));
        let result = decode_schema(&mut reader, FormatVersion::new(40));
        assert!(matches!(
            result,
            Err(DecodeError::Wire(WireError::UnexpectedEof { .. }))
        ));
    }
}
