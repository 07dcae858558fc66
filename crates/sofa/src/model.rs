//! Model definitions.
//!
//! A [`Model`] is the runtime counterpart of a class: it names the type
//! discriminator stored in its documents and owns the property schema,
//! validators, callbacks and associations documents of that type follow.

mod build;
pub use build::BuildOptions;

mod definition;
pub(crate) use definition::Definition;

mod query;

use crate::{
    callbacks::{Callback, Phase},
    registry::{self, Config},
    relation::{Dependent, HasMany, HasManyOptions, HasManySpec},
    validation::Validator,
    Database, Document, Error, Registry, Result,
};

use parking_lot::{RwLock, RwLockReadGuard};
use sofa_core::schema::{Property, PropertySchema, PropertyTy};

use std::{
    fmt,
    sync::{Arc, Weak},
};

/// Handle to a registered model. Cheap to clone; clones refer to the same
/// definition.
#[derive(Clone)]
pub struct Model {
    inner: Arc<ModelInner>,
}

struct ModelInner {
    /// Type discriminator value, also the name the registry knows it by
    name: String,

    parent: Option<Model>,

    registry: Weak<registry::Shared>,

    config: Arc<Config>,

    definition: RwLock<Definition>,
}

/// Hook run on every new document before the `initialize` callbacks.
pub type AfterInitialize = Arc<dyn Fn(&mut Document) + Send + Sync>;

impl Model {
    pub(crate) fn new(
        name: &str,
        parent: Option<Model>,
        registry: Weak<registry::Shared>,
        config: Arc<Config>,
        definition: Definition,
    ) -> Model {
        Model {
            inner: Arc::new(ModelInner {
                name: name.to_string(),
                parent,
                registry,
                config,
                definition: RwLock::new(definition),
            }),
        }
    }

    /// The model name, which is also the discriminator value stored in its
    /// documents.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn type_value(&self) -> &str {
        &self.inner.name
    }

    /// Attribute holding the discriminator, shared registry-wide.
    pub fn model_type_key(&self) -> &str {
        &self.inner.config.model_type_key
    }

    pub(crate) fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn parent(&self) -> Option<&Model> {
        self.inner.parent.as_ref()
    }

    /// True if `ancestor` appears anywhere in this model's parent chain.
    pub fn is_descendant_of(&self, ancestor: &Model) -> bool {
        let mut current = self.parent();
        while let Some(model) = current {
            if model == ancestor {
                return true;
            }
            current = model.parent();
        }
        false
    }

    /// The registry this model was defined in, while it is alive.
    pub fn registry(&self) -> Option<Registry> {
        self.inner.registry.upgrade().map(Registry::from_shared)
    }

    /// Define a subclass of this model in the same registry.
    pub fn subclass(&self, name: &str) -> Result<Model> {
        let registry = self.registry().ok_or_else(|| {
            Error::invalid_operation(format!(
                "cannot subclass `{}`: its registry was dropped",
                self.name()
            ))
        })?;

        registry.derive(self, name)
    }

    /// Resolve a registered model by name, as seen from this model.
    pub fn resolve(&self, name: &str) -> Option<Model> {
        self.registry()?.resolve(name)
    }

    pub(crate) fn definition(&self) -> RwLockReadGuard<'_, Definition> {
        self.inner.definition.read()
    }

    fn update<R>(&self, f: impl FnOnce(&mut Definition) -> R) -> R {
        f(&mut self.inner.definition.write())
    }

    // ===== Properties =====

    /// Declare a property. Names must be unique within the model.
    pub fn property(&self, property: Property) -> Result<&Self> {
        self.update(|definition| definition.properties.add(property))
            .map_err(|err| {
                err.context(Error::invalid_schema(format!("on model `{}`", self.name())))
            })?;
        Ok(self)
    }

    /// Shorthand for declaring a property with no options.
    pub fn field(&self, name: &str, ty: PropertyTy) -> Result<&Self> {
        self.property(Property::new(name, ty))
    }

    /// A copy of the current property schema.
    pub fn properties(&self) -> PropertySchema {
        self.definition().properties.clone()
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.definition().properties.contains(name)
    }

    // ===== Validators =====

    /// Register a validator run by [`Document::validate`] and before saves.
    pub fn validates<F>(&self, name: impl Into<String>, check: F) -> &Self
    where
        F: Fn(&Document) -> Result<()> + Send + Sync + 'static,
    {
        let validator = Validator::new(name, check);
        self.update(|definition| definition.validators.push(validator));
        self
    }

    pub fn validators(&self) -> Vec<Validator> {
        self.definition().validators.clone()
    }

    // ===== Callbacks =====

    /// Register a named callback. A callback with the same name in the same
    /// phase is replaced in place.
    pub fn set_callback<F>(&self, phase: Phase, name: impl Into<String>, f: F) -> &Self
    where
        F: Fn(&mut Document) -> Result<bool> + Send + Sync + 'static,
    {
        let callback = Callback::new(name, f);
        self.update(|definition| definition.callbacks.set(phase, callback));
        self
    }

    /// Remove a named callback. Returns `true` if it was registered.
    pub fn skip_callback(&self, phase: Phase, name: &str) -> bool {
        self.update(|definition| definition.callbacks.remove(phase, name))
    }

    /// Names of the callbacks registered for `phase`, in run order.
    pub fn callbacks(&self, phase: Phase) -> Vec<String> {
        self.definition()
            .callbacks
            .chain(phase)
            .iter()
            .map(|callback| callback.name().to_string())
            .collect()
    }

    pub fn on_initialize<F>(&self, name: impl Into<String>, f: F) -> &Self
    where
        F: Fn(&mut Document) -> Result<bool> + Send + Sync + 'static,
    {
        self.set_callback(Phase::Initialize, name, f)
    }

    pub fn before_save<F>(&self, name: impl Into<String>, f: F) -> &Self
    where
        F: Fn(&mut Document) -> Result<bool> + Send + Sync + 'static,
    {
        self.set_callback(Phase::BeforeSave, name, f)
    }

    pub fn after_save<F>(&self, name: impl Into<String>, f: F) -> &Self
    where
        F: Fn(&mut Document) -> Result<bool> + Send + Sync + 'static,
    {
        self.set_callback(Phase::AfterSave, name, f)
    }

    pub fn before_destroy<F>(&self, name: impl Into<String>, f: F) -> &Self
    where
        F: Fn(&mut Document) -> Result<bool> + Send + Sync + 'static,
    {
        self.set_callback(Phase::BeforeDestroy, name, f)
    }

    pub fn after_destroy<F>(&self, name: impl Into<String>, f: F) -> &Self
    where
        F: Fn(&mut Document) -> Result<bool> + Send + Sync + 'static,
    {
        self.set_callback(Phase::AfterDestroy, name, f)
    }

    /// Fill the after-initialize slot. Replaces any previous hook.
    pub fn set_after_initialize<F>(&self, f: F) -> &Self
    where
        F: Fn(&mut Document) + Send + Sync + 'static,
    {
        let hook: AfterInitialize = Arc::new(f);
        self.update(|definition| definition.after_initialize = Some(hook));
        self
    }

    pub fn clear_after_initialize(&self) -> &Self {
        self.update(|definition| definition.after_initialize = None);
        self
    }

    // ===== Database binding =====

    /// Default database for documents of this model and of subclasses
    /// derived afterwards.
    pub fn use_database(&self, db: &Database) -> &Self {
        let db = db.clone();
        self.update(|definition| definition.database = Some(db));
        self
    }

    pub fn database(&self) -> Option<Database> {
        self.definition().database.clone()
    }

    // ===== Associations =====

    /// Declare a one-to-many relation to the model named by the options
    /// (default: the singular, camel-cased relation name).
    ///
    /// This adds the collection-of-ids property to the schema, records the
    /// relation, and registers the autosave and dependent callbacks it asks
    /// for. Declaring a relation name twice replaces the earlier declaration
    /// along with its property and callbacks.
    pub fn has_many(&self, name: &str, options: HasManyOptions) -> Result<Arc<HasManySpec>> {
        if std_util::str::is_blank(name) {
            return Err(Error::invalid_schema(format!(
                "relation name on model `{}` must not be blank",
                self.name()
            )));
        }

        let spec = Arc::new(HasManySpec::resolve(name, options));

        self.update(|definition| {
            if let Some(previous) = definition.associations.get(name).cloned() {
                if previous.collection_of != spec.collection_of {
                    definition.properties.remove(&previous.collection_of);
                }

                for (phase, callback) in previous.callback_names() {
                    definition.callbacks.remove(phase, &callback);
                }
            }

            definition.properties.insert(spec.collection_property());
            definition
                .associations
                .insert(name.to_string(), spec.clone());

            if spec.autosave {
                let relation = spec.clone();
                definition.callbacks.set(
                    Phase::AfterSave,
                    Callback::new(spec.save_callback_name(), move |owner| {
                        HasMany::new(owner, relation.clone()).save_all()
                    }),
                );
            }

            match spec.dependent {
                Dependent::None => {}
                Dependent::Destroy => {
                    let relation = spec.clone();
                    definition.callbacks.set(
                        Phase::BeforeDestroy,
                        Callback::new(spec.destroy_callback_name(), move |owner| {
                            HasMany::new(owner, relation.clone()).destroy_all()
                        }),
                    );
                }
                Dependent::Nullify => {
                    let relation = spec.clone();
                    definition.callbacks.set(
                        Phase::BeforeDestroy,
                        Callback::new(spec.nullify_callback_name(), move |owner| {
                            HasMany::new(owner, relation.clone()).nullify_all()
                        }),
                    );
                }
            }
        });

        tracing::debug!(
            model = %self.name(),
            relation = %spec.name,
            target = %spec.proxy,
            foreign_key = %spec.foreign_key,
            "declared has_many"
        );

        Ok(spec)
    }

    /// Names of the declared has-many relations, in declaration order.
    pub fn has_many_associations(&self) -> Vec<String> {
        self.definition().associations.keys().cloned().collect()
    }

    pub fn association(&self, name: &str) -> Option<Arc<HasManySpec>> {
        self.definition().associations.get(name).cloned()
    }

    /// Attributes used as a natural key by [`Model::find_by`].
    pub fn find_by_attributes(&self, attributes: &[&str]) -> &Self {
        let attributes = attributes.iter().map(|name| name.to_string()).collect();
        self.update(|definition| definition.find_by_attributes = attributes);
        self
    }

    pub fn natural_key(&self) -> Vec<String> {
        self.definition().find_by_attributes.clone()
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Model) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Model {}

impl fmt::Debug for Model {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "Model({})", self.name())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.name())
    }
}
