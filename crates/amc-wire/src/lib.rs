#![warn(clippy::pedantic)]

pub mod cursor;
pub mod error;
pub mod header;
pub mod source;
pub mod text;

pub use cursor::{CursorReader, ReadCounters};
pub use error::WireError;
pub use header::{AmcHeader, FormatVersion};
pub use source::{CatalogSource, FileSource, MemorySource};
