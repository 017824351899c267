use amc_types::FieldDefinition;

/// A custom-field schema entry as written to disk.
///
/// The decoder keeps only the [`FieldDefinition`] part; the list values
/// exist so fixtures can exercise the `ftList` branch of the schema
/// layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaField {
    pub definition: FieldDefinition,
    pub list_values: Vec<String>,
}

impl SchemaField {
    #[must_use]
    pub fn new(tag: &str, name: &str, field_type: &str, default_value: &str) -> Self {
        Self {
            definition: FieldDefinition {
                tag: tag.to_string(),
                name: name.to_string(),
                field_type: field_type.to_string(),
                default_value: default_value.to_string(),
            },
            list_values: Vec::new(),
        }
    }

    /// Attach allowed values. Only written when the field type is
    /// `ftList`.
    #[must_use]
    pub fn with_list_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.list_values = values.into_iter().map(Into::into).collect();
        self
    }
}

impl From<FieldDefinition> for SchemaField {
    fn from(definition: FieldDefinition) -> Self {
        Self {
            definition,
            list_values: Vec::new(),
        }
    }
}
