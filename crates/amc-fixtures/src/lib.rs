#![warn(clippy::pedantic)]

pub mod error;
pub mod payload_writer;
pub mod schema_field;
pub mod writer;

pub use error::FixtureError;
pub use payload_writer::PayloadWriter;
pub use schema_field::SchemaField;
pub use writer::CatalogWriter;
