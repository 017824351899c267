use amc_wire::FormatVersion;

use crate::field::FieldDefinition;
use crate::movie::MovieRecord;

/// A fully decoded catalog.
///
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │ Catalog                                              │
/// │   version:      FormatVersion  ← gates every record  │
/// │   header:       String         ← display text        │
/// │   field_schema: Vec<FieldDefinition>  (file order)   │
/// │   movies:       Vec<MovieRecord>      (file order)   │
/// └──────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Catalog {
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_version"))]
    pub version: FormatVersion,
    pub header: String,
    pub field_schema: Vec<FieldDefinition>,
    pub movies: Vec<MovieRecord>,
}

impl Catalog {
    /// Look up a schema definition by tag.
    #[must_use]
    pub fn field(&self, tag: &str) -> Option<&FieldDefinition> {
        self.field_schema.iter().find(|f| f.tag == tag)
    }

    /// Number of present pictures across all movies and their extras.
    #[must_use]
    pub fn picture_count(&self) -> usize {
        self.movies
            .iter()
            .map(|m| {
                usize::from(m.picture.is_some())
                    + m.extras.iter().filter(|e| e.picture.is_some()).count()
            })
            .sum()
    }
}

/// Owner and description block read right after the header.
///
/// This is a single row for a relational exporter; it is not part of
/// [`Catalog`] itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CatalogProperties {
    pub owner_name: String,
    pub owner_mail: String,
    pub owner_site: String,
    pub description: String,
}

#[cfg(feature = "serde")]
#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_version<S: serde::Serializer>(
    version: &FormatVersion,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u32(version.raw())
}
