use super::PropertyTy;
use crate::{
    attributes::{is_blank, Value},
    Result,
};

use indexmap::IndexMap;

/// A declared property: name, type and options.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub ty: PropertyTy,
    pub options: PropertyOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyOptions {
    /// Value written into new documents that do not supply one.
    pub default: Option<Value>,

    /// Whether blank values are acceptable.
    pub allow_blank: bool,

    /// Read-only properties are never assigned from untrusted input.
    pub read_only: bool,

    /// Free-form options attached by whoever declared the property.
    pub extra: IndexMap<String, Value>,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: PropertyTy) -> Property {
        Property {
            name: name.into(),
            ty,
            options: PropertyOptions::default(),
        }
    }

    pub fn default(mut self, value: impl Into<Value>) -> Property {
        self.options.default = Some(value.into());
        self
    }

    pub fn allow_blank(mut self, allow_blank: bool) -> Property {
        self.options.allow_blank = allow_blank;
        self
    }

    pub fn read_only(mut self) -> Property {
        self.options.read_only = true;
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Property {
        self.options.extra.insert(key.into(), value.into());
        self
    }

    /// The value a new document starts with. Arrays default to empty.
    pub fn default_value(&self) -> Option<Value> {
        match (&self.options.default, &self.ty) {
            (Some(value), _) => Some(value.clone()),
            (None, PropertyTy::Array(_)) => Some(Value::Array(vec![])),
            (None, _) => None,
        }
    }

    /// Coerces an untrusted input value to this property's type.
    ///
    /// When blanks are not allowed, a blank string becomes `null` and blank
    /// entries are dropped from arrays.
    pub fn coerce(&self, value: Value) -> Result<Value> {
        let value = self.ty.coerce(&self.name, value)?;

        if self.options.allow_blank {
            return Ok(value);
        }

        Ok(match value {
            Value::String(s) if s.trim().is_empty() => Value::Null,
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .filter(|item| !is_blank(item))
                    .collect(),
            ),
            value => value,
        })
    }
}

impl Default for PropertyOptions {
    fn default() -> Self {
        PropertyOptions {
            default: None,
            allow_blank: true,
            read_only: false,
            extra: IndexMap::new(),
        }
    }
}
