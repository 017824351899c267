#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod extras;
pub mod movie;
pub mod picture;
pub mod properties;
pub mod schema;

pub use config::{DEFAULT_MAX_EXTRAS, DecoderConfig};
pub use decoder::{
    CatalogDecoder, DecodeState, DecodeStats, DecodedCatalog, RecordAbort, decode_bytes,
    decode_file,
};
pub use error::DecodeError;
pub use movie::{MovieDecoder, RecordOutcome};
