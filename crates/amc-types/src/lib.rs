#![warn(clippy::pedantic)]

pub mod catalog;
pub mod date;
pub mod extra;
pub mod field;
pub mod movie;
pub mod picture;

pub use amc_wire::FormatVersion;
pub use catalog::{Catalog, CatalogProperties};
pub use date::delphi_date;
pub use extra::ExtraRecord;
pub use field::{CustomValues, FieldDefinition};
pub use movie::MovieRecord;
pub use picture::Picture;
