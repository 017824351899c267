/// Field type name that carries an additional list of allowed values in
/// the schema.
pub const LIST_FIELD_TYPE: &str = "ftList";

/// One user-defined field from the catalog's custom-field schema.
///
/// The position of a definition in [`Catalog::field_schema`] is part of
/// the format: each movie stores its custom values as a bare sequence of
/// strings in schema order, with no tags of their own.
///
/// [`Catalog::field_schema`]: crate::Catalog::field_schema
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDefinition {
    pub tag: String,
    pub name: String,
    pub field_type: String,
    pub default_value: String,
}

impl FieldDefinition {
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.field_type == LIST_FIELD_TYPE
    }
}

/// Custom values of one movie, keyed by schema tag, in schema order.
///
/// Built by zipping the schema with the value sequence read from the
/// record, so it always has exactly one entry per schema definition.
/// Lookup by tag is a linear scan; schemas are small. If a malformed
/// schema repeats a tag, both entries are kept and [`get`](Self::get)
/// returns the first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomValues {
    entries: Vec<(String, String)>,
}

impl CustomValues {
    /// Pair each schema definition with the value at the same position.
    ///
    /// Extra values or definitions beyond the shorter sequence are
    /// dropped; the decoder always supplies equal lengths.
    #[must_use]
    pub fn zip(schema: &[FieldDefinition], values: Vec<String>) -> Self {
        let entries = schema
            .iter()
            .zip(values)
            .map(|(def, value)| (def.tag.clone(), value))
            .collect();
        Self { entries }
    }

    /// Value stored for `tag`, if the schema defines it.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, v)| v.as_str())
    }

    /// `(tag, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CustomValues {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (tag, value) in &self.entries {
            map.serialize_entry(tag, value)?;
        }
        map.end()
    }
}
