use super::*;

use crate::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryView {
    /// Discriminator value of the model owning the view. Only documents of
    /// exactly this type are emitted.
    pub model: String,

    /// Attribute holding the discriminator
    pub model_type_key: String,

    /// View name, e.g. `by_dog_id` or `by_name_and_breed`
    pub view: String,

    /// Key to match. Composite views take an array with one entry per
    /// attribute.
    pub key: Value,
}

impl QueryView {
    /// Attribute names the view is keyed on, parsed from the `by_a_and_b`
    /// naming convention.
    pub fn key_attributes(&self) -> Vec<&str> {
        self.view
            .strip_prefix("by_")
            .map(|rest| rest.split("_and_").collect())
            .unwrap_or_default()
    }
}

impl From<QueryView> for Operation {
    fn from(value: QueryView) -> Self {
        Self::QueryView(value)
    }
}
