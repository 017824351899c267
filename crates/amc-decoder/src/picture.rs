use amc_types::Picture;
use amc_wire::{CatalogSource, CursorReader};
use log::trace;

use crate::error::DecodeError;

/// Decode a picture sub-record.
///
/// ```text
///   path (string) │ size (int32) │ size bytes of image data if size > 0
/// ```
///
/// The path is always consumed. A size of zero or less means there is no
/// picture: the result is `None` and nothing past the size field is read.
///
/// # Errors
///
/// Any primitive read failure, unchanged.
pub fn decode_picture<S: CatalogSource>(
    reader: &mut CursorReader<S>,
) -> Result<Option<Picture>, DecodeError> {
    let path = reader.read_string("pic_path")?;
    let size = reader.read_i32("pic_size")?;

    let Ok(len) = u64::try_from(size) else {
        trace!("no picture data (size {size}, path {path:?})");
        return Ok(None);
    };
    if len == 0 {
        trace!("no picture data (size 0, path {path:?})");
        return Ok(None);
    }

    let bytes = reader.read_bytes(len, "pic_data")?;
    Ok(Some(Picture::new(path, bytes)))
}
