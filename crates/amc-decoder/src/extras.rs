use amc_types::ExtraRecord;
use amc_wire::{CatalogSource, CursorReader};
use log::{debug, warn};

use crate::error::DecodeError;
use crate::picture::decode_picture;

/// Decode the extras list that closes a 4.2+ movie record.
///
/// ```text
///   count (int32)
///   count × { checked (bool) │ tag │ title │ category │ url
///             │ description │ comments │ created-by │ picture }
/// ```
///
/// A count outside `0..=max_extras` means the cursor has almost certainly
/// lost sync. That is reported as [`DecodeError::CorruptSubrecord`] with
/// nothing consumed past the count; the movie decoder recovers it as an
/// empty list. Any failure inside an individual extra propagates.
///
/// # Errors
///
/// - [`DecodeError::CorruptSubrecord`] for an out-of-range count.
/// - Any primitive read failure, unchanged.
pub fn decode_extras<S: CatalogSource>(
    reader: &mut CursorReader<S>,
    max_extras: u32,
) -> Result<Vec<ExtraRecord>, DecodeError> {
    let offset = reader.offset();
    let count = reader.read_i32("extras_count")?;

    let len = match u32::try_from(count) {
        Ok(n) if n <= max_extras => n,
        _ => {
            warn!("suspicious extras count {count} at offset {offset}, skipping extras");
            return Err(DecodeError::CorruptSubrecord {
                offset,
                count,
                limit: max_extras,
            });
        }
    };

    let mut extras = Vec::with_capacity(len.min(64) as usize);
    for i in 0..len {
        debug!("reading extra {}/{len} at offset {}", i + 1, reader.offset());
        extras.push(decode_extra(reader)?);
    }
    Ok(extras)
}

fn decode_extra<S: CatalogSource>(
    reader: &mut CursorReader<S>,
) -> Result<ExtraRecord, DecodeError> {
    Ok(ExtraRecord {
        checked: reader.read_bool("extra_checked")?,
        tag: reader.read_string("extra_tag")?,
        title: reader.read_string("extra_title")?,
        category: reader.read_string("extra_category")?,
        url: reader.read_string("extra_url")?,
        description: reader.read_string("extra_description")?,
        comments: reader.read_string("extra_comments")?,
        created_by: reader.read_string("extra_created_by")?,
        picture: decode_picture(reader)?,
    })
}
