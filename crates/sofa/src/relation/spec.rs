use crate::{callbacks::Phase, Value};

use sofa_core::schema::{Property, PropertyTy};
use std_util::str::{singularize, upper_camel_case};

use std::fmt;

/// What happens to the children of a relation when the owner is destroyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dependent {
    /// Children are left alone
    #[default]
    None,

    /// Children are destroyed before the owner
    Destroy,

    /// Children have their foreign key cleared and are saved
    Nullify,
}

impl Dependent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dependent::None => "none",
            Dependent::Destroy => "destroy",
            Dependent::Nullify => "nullify",
        }
    }
}

impl fmt::Display for Dependent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overrides for a has-many declaration. Unset fields take their defaults
/// from the relation name.
#[derive(Debug, Clone, Default)]
pub struct HasManyOptions {
    foreign_key: Option<String>,
    class_name: Option<String>,
    proxy: Option<String>,
    collection_of: Option<String>,
    dependent: Dependent,
    autosave: Option<bool>,
    allow_blank: bool,
}

impl HasManyOptions {
    pub fn new() -> HasManyOptions {
        HasManyOptions::default()
    }

    /// Child attribute referencing the owner. Defaults to `<singular>_id`.
    pub fn foreign_key(mut self, name: impl Into<String>) -> Self {
        self.foreign_key = Some(name.into());
        self
    }

    /// Child model name. Defaults to the camel-cased singular.
    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    /// Model children are loaded and built through. Defaults to the class
    /// name.
    pub fn proxy(mut self, name: impl Into<String>) -> Self {
        self.proxy = Some(name.into());
        self
    }

    /// Owner attribute listing the child ids. Defaults to `<singular>_ids`.
    pub fn collection_of(mut self, name: impl Into<String>) -> Self {
        self.collection_of = Some(name.into());
        self
    }

    pub fn dependent(mut self, dependent: Dependent) -> Self {
        self.dependent = dependent;
        self
    }

    /// Save children after the owner is saved. On by default.
    pub fn autosave(mut self, autosave: bool) -> Self {
        self.autosave = Some(autosave);
        self
    }

    pub fn allow_blank(mut self, allow_blank: bool) -> Self {
        self.allow_blank = allow_blank;
        self
    }
}

/// A declared has-many relation with every option resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct HasManySpec {
    /// Relation name, e.g. `puppies`
    pub name: String,

    /// Child attribute holding the owner id, e.g. `puppy_id`
    pub foreign_key: String,

    pub class_name: String,

    /// Name of the model children are resolved to
    pub proxy: String,

    /// Owner attribute holding the child ids, e.g. `puppy_ids`
    pub collection_of: String,

    pub dependent: Dependent,

    pub autosave: bool,

    pub allow_blank: bool,
}

impl HasManySpec {
    pub fn resolve(name: &str, options: HasManyOptions) -> HasManySpec {
        let singular = singularize(name);
        let class_name = options
            .class_name
            .unwrap_or_else(|| upper_camel_case(&singular));

        HasManySpec {
            name: name.to_string(),
            foreign_key: options
                .foreign_key
                .unwrap_or_else(|| format!("{singular}_id")),
            proxy: options.proxy.unwrap_or_else(|| class_name.clone()),
            class_name,
            collection_of: options
                .collection_of
                .unwrap_or_else(|| format!("{singular}_ids")),
            dependent: options.dependent,
            autosave: options.autosave.unwrap_or(true),
            allow_blank: options.allow_blank,
        }
    }

    /// Name of the view listing children by owner id.
    pub fn view_name(&self) -> String {
        format!("by_{}", self.foreign_key)
    }

    /// The owner property holding child ids. The relation options travel
    /// with it.
    pub(crate) fn collection_property(&self) -> Property {
        Property::new(&self.collection_of, PropertyTy::string_array())
            .allow_blank(self.allow_blank)
            .option("relation", self.name.as_str())
            .option("foreign_key", self.foreign_key.as_str())
            .option("class_name", self.class_name.as_str())
            .option("proxy", self.proxy.as_str())
            .option("dependent", self.dependent.as_str())
            .option("autosave", Value::Bool(self.autosave))
    }

    pub(crate) fn save_callback_name(&self) -> String {
        format!("save_associated_{}", self.name)
    }

    pub(crate) fn destroy_callback_name(&self) -> String {
        format!("destroy_associated_{}", self.name)
    }

    pub(crate) fn nullify_callback_name(&self) -> String {
        format!("nullify_associated_{}", self.name)
    }

    /// Every callback a declaration of this relation may register.
    pub(crate) fn callback_names(&self) -> [(Phase, String); 3] {
        [
            (Phase::AfterSave, self.save_callback_name()),
            (Phase::BeforeDestroy, self.destroy_callback_name()),
            (Phase::BeforeDestroy, self.nullify_callback_name()),
        ]
    }
}
