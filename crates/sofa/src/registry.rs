//! The set of known models.
//!
//! A registry is populated while models are being defined and only read
//! afterwards: polymorphic loading resolves a stored discriminator against
//! it, and nothing outside of it can ever be resolved.

mod builder;
pub use builder::Builder;

use crate::{model::Definition, Error, Model, Result};

use indexmap::IndexMap;
use parking_lot::RwLock;

use std::sync::{Arc, OnceLock};

/// Registry-wide settings shared by every model defined in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Attribute holding the type discriminator
    pub model_type_key: String,

    /// Accept undeclared attributes on mass assignment instead of dropping
    /// them
    pub mass_assign_any_attribute: bool,
}

#[derive(Clone)]
pub struct Registry {
    shared: Arc<Shared>,
}

pub(crate) struct Shared {
    pub(crate) config: Arc<Config>,
    models: RwLock<IndexMap<String, Model>>,
}

impl Registry {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// A registry with the default configuration.
    pub fn new() -> Registry {
        Registry::builder().build()
    }

    /// The process-wide registry.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    pub(crate) fn from_config(config: Config) -> Registry {
        Registry {
            shared: Arc::new(Shared {
                config: Arc::new(config),
                models: RwLock::new(IndexMap::new()),
            }),
        }
    }

    pub(crate) fn from_shared(shared: Arc<Shared>) -> Registry {
        Registry { shared }
    }

    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    /// Define a root model, one with no parent.
    pub fn define(&self, name: &str) -> Result<Model> {
        let model = Model::new(
            name,
            None,
            Arc::downgrade(&self.shared),
            self.shared.config.clone(),
            Definition::default(),
        );

        self.register(model)
    }

    /// Define `name` as a subclass of `parent`.
    ///
    /// The subclass starts with an independent copy of everything the parent
    /// has declared so far: properties, validators, callbacks, associations,
    /// natural keys and default database. Declarations made on either model
    /// afterwards stay local to it.
    pub fn derive(&self, parent: &Model, name: &str) -> Result<Model> {
        if !self.contains(parent) {
            return Err(Error::invalid_schema(format!(
                "cannot derive `{name}` from `{}`: parent is not registered here",
                parent.name()
            )));
        }

        let definition = parent.definition().derive();
        let properties = definition.properties.len();

        let model = Model::new(
            name,
            Some(parent.clone()),
            Arc::downgrade(&self.shared),
            self.shared.config.clone(),
            definition,
        );

        let model = self.register(model)?;

        tracing::debug!(
            model = %model.name(),
            parent = %parent.name(),
            properties,
            "derived model"
        );

        Ok(model)
    }

    fn register(&self, model: Model) -> Result<Model> {
        if std_util::str::is_blank(model.name()) {
            return Err(Error::invalid_schema("model name must not be blank"));
        }

        let mut models = self.shared.models.write();

        if models.contains_key(model.name()) {
            return Err(Error::invalid_schema(format!(
                "model `{}` is already registered",
                model.name()
            )));
        }

        tracing::debug!(model = %model.name(), "registered model");
        models.insert(model.name().to_string(), model.clone());
        Ok(model)
    }

    /// Resolve a type name to a registered model. Names that were never
    /// registered resolve to nothing.
    pub fn resolve(&self, name: &str) -> Option<Model> {
        self.shared.models.read().get(name).cloned()
    }

    /// True if this exact model was registered here.
    pub fn contains(&self, model: &Model) -> bool {
        self.shared
            .models
            .read()
            .get(model.name())
            .is_some_and(|registered| registered == model)
    }

    /// Every registered model, in definition order.
    pub fn models(&self) -> Vec<Model> {
        self.shared.models.read().values().cloned().collect()
    }

    /// Registered models that descend from `model`, directly or not.
    pub fn descendants_of(&self, model: &Model) -> Vec<Model> {
        self.shared
            .models
            .read()
            .values()
            .filter(|candidate| candidate.is_descendant_of(model))
            .cloned()
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let models = self.shared.models.read();
        fmt.debug_struct("Registry")
            .field("config", &self.shared.config)
            .field("models", &models.keys().collect::<Vec<_>>())
            .finish()
    }
}
