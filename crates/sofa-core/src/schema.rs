//! Per-model property schema.

mod property;
pub use property::{Property, PropertyOptions};

mod ty;
pub use ty::PropertyTy;

use crate::{attributes::Attributes, Error, Result};
use indexmap::IndexMap;

/// Ordered set of properties declared on one model.
///
/// A subclass receives a [`Clone`] of its parent's schema when it is
/// derived. The clone shares nothing with the original, so later
/// declarations on either side stay local to that model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySchema {
    properties: IndexMap<String, Property>,
}

impl PropertySchema {
    pub fn new() -> PropertySchema {
        PropertySchema::default()
    }

    /// Declares a new property. Fails if the name is already taken.
    pub fn add(&mut self, property: Property) -> Result<()> {
        if self.properties.contains_key(&property.name) {
            return Err(Error::invalid_schema(format!(
                "property `{}` is already declared",
                property.name
            )));
        }

        self.properties.insert(property.name.clone(), property);
        Ok(())
    }

    /// Declares a property, replacing any existing one with the same name in
    /// place. Returns the replaced property.
    pub fn insert(&mut self, property: Property) -> Option<Property> {
        self.properties.insert(property.name.clone(), property)
    }

    /// Removes a property, keeping the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<Property> {
        self.properties.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Property> + '_ {
        self.properties.values()
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.properties.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Writes every property default into `attributes`, skipping keys that
    /// already hold a value.
    pub fn apply_defaults(&self, attributes: &mut Attributes) {
        for property in self.iter() {
            if attributes.contains_key(&property.name) {
                continue;
            }

            if let Some(default) = property.default_value() {
                attributes.insert(property.name.clone(), default);
            }
        }
    }
}

impl<'a> IntoIterator for &'a PropertySchema {
    type Item = &'a Property;
    type IntoIter = indexmap::map::Values<'a, String, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.values()
    }
}
