//! Model instances.

mod persistence;

use crate::{
    callbacks::{self, Phase},
    model::BuildOptions,
    relation::HasMany,
    Attributes, Database, Error, Model, Result, Value, WeakDatabase,
};

use indexmap::IndexMap;
use sofa_core::attributes::{self, ID, REV};

use std::fmt;

/// One mapped document.
///
/// A document is *new* until it carries both an `_id` and a `_rev`. It owns
/// its attribute map, a snapshot of the last loaded or persisted state used
/// for change tracking, and the memoized children of its has-many relations.
pub struct Document {
    model: Model,

    attributes: Attributes,

    /// Attributes as last loaded from or written to storage
    snapshot: Attributes,

    /// Explicit binding; falls back to the model's default database
    binding: Option<WeakDatabase>,

    /// Memoized has-many children, by relation name
    pub(crate) associations: IndexMap<String, Vec<Document>>,

    /// The discriminator was written at construction
    fresh: bool,

    /// Built from trusted storage attributes
    loaded: bool,

    destroyed: bool,
}

impl Document {
    /// Assembles a document in memory. Never performs I/O.
    pub(crate) fn construct(
        model: Model,
        raw: Attributes,
        options: BuildOptions,
        init: Option<&mut dyn FnMut(&mut Document)>,
    ) -> Result<Document> {
        let mut doc = Document {
            model,
            attributes: Attributes::new(),
            snapshot: Attributes::new(),
            binding: options.database.as_ref().map(Database::downgrade),
            associations: IndexMap::new(),
            fresh: false,
            loaded: options.directly_set_attributes,
            destroyed: false,
        };

        doc.model.definition().properties.apply_defaults(&mut doc.attributes);

        if options.directly_set_attributes {
            doc.attributes.extend(raw);
            doc.snapshot = doc.attributes.clone();
        } else {
            doc.write_attributes(raw)?;
        }

        if doc.is_new() {
            let key = doc.model.model_type_key().to_string();
            let value = Value::from(doc.model.type_value());
            doc.attributes.insert(key, value);
            doc.fresh = true;
        }

        if let Some(init) = init {
            init(&mut doc);
        }

        let after_initialize = doc.model.definition().after_initialize.clone();
        if let Some(after_initialize) = after_initialize {
            after_initialize(&mut doc);
        }

        callbacks::run(Phase::Initialize, &mut doc)?;

        Ok(doc)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn id(&self) -> Option<&str> {
        attributes::id(&self.attributes)
    }

    pub fn rev(&self) -> Option<&str> {
        attributes::rev(&self.attributes)
    }

    /// The stored discriminator value.
    pub fn type_value(&self) -> Option<&str> {
        attributes::str_attr(&self.attributes, self.model.model_type_key())
    }

    /// True until the document carries both an id and a revision.
    pub fn is_new(&self) -> bool {
        self.id().is_none() || self.rev().is_none()
    }

    pub fn is_new_record(&self) -> bool {
        self.is_new()
    }

    pub fn is_persisted(&self) -> bool {
        !self.is_new() && !self.destroyed
    }

    /// True if construction wrote the discriminator.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// True if the document was built from trusted storage attributes.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Assigns one attribute. Declared properties are coerced to their type;
    /// anything else is stored as given.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();

        let value = match self.model.definition().properties.get(name) {
            Some(property) => property.coerce(value)?,
            None => value,
        };

        self.attributes.insert(name.to_string(), value);
        Ok(())
    }

    /// Removes an attribute, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.shift_remove(name)
    }

    /// Mass-assigns untrusted input.
    ///
    /// `id` is accepted as an alias of `_id`. Read-only properties are
    /// skipped. Undeclared keys, `_rev` and the discriminator are dropped
    /// unless the registry allows any attribute.
    pub fn write_attributes(&mut self, input: Attributes) -> Result<()> {
        let type_key = self.model.model_type_key().to_string();
        let mass_assign = self.model.config().mass_assign_any_attribute;
        let definition = self.model.definition();

        let mut assigned = Vec::with_capacity(input.len());

        for (name, value) in input {
            if name == REV || name == type_key {
                if mass_assign {
                    assigned.push((name, value));
                }
                continue;
            }

            if name == ID || name == "id" {
                if !attributes::is_blank(&value) {
                    assigned.push((ID.to_string(), value));
                }
                continue;
            }

            match definition.properties.get(&name) {
                Some(property) if property.options.read_only => {}
                Some(property) => {
                    let value = property.coerce(value)?;
                    assigned.push((name, value));
                }
                None if mass_assign => assigned.push((name, value)),
                None => {}
            }
        }

        drop(definition);
        self.attributes.extend(assigned);
        Ok(())
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// A copy of the attribute map, as it would be written to storage.
    pub fn to_attributes(&self) -> Attributes {
        self.attributes.clone()
    }

    /// Names of attributes that differ from the last persisted state, in
    /// attribute order followed by removed attributes.
    pub fn changes(&self) -> Vec<String> {
        let changed = self
            .attributes
            .iter()
            .filter(|(name, value)| self.snapshot.get(*name) != Some(*value))
            .map(|(name, _)| name.clone());

        let removed = self
            .snapshot
            .keys()
            .filter(|name| !self.attributes.contains_key(*name))
            .cloned();

        changed.chain(removed).collect()
    }

    /// True if an own attribute changed, or a memoized child has changes.
    ///
    /// Relations that were never accessed are not loaded.
    pub fn has_changes(&self) -> bool {
        self.attributes != self.snapshot
            || self
                .associations
                .values()
                .flatten()
                .any(Document::has_changes)
    }

    /// Marks the current attributes as the persisted state.
    pub fn clear_changes(&mut self) {
        self.snapshot = self.attributes.clone();
    }

    /// Runs the model's validators, returning the first failure.
    pub fn validate(&self) -> Result<()> {
        let validators = self.model.validators();

        for validator in &validators {
            validator.check(self)?;
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// The database this document reads from and writes to: its own binding
    /// if it has one, otherwise the model's default.
    pub fn database(&self) -> Option<Database> {
        match &self.binding {
            Some(binding) => binding.upgrade(),
            None => self.model.database(),
        }
    }

    /// Rebinds the document to `db`.
    pub fn use_database(&mut self, db: &Database) {
        self.binding = Some(db.downgrade());
    }

    fn effective_binding(&self) -> Option<WeakDatabase> {
        match &self.binding {
            Some(binding) => Some(binding.clone()),
            None => self.model.database().map(|db| db.downgrade()),
        }
    }

    pub(crate) fn require_database(&self) -> Result<Database> {
        self.database().ok_or_else(|| {
            Error::invalid_operation(format!(
                "document of model `{}` is not bound to a database",
                self.model.name()
            ))
        })
    }

    // ===== Associations =====

    /// Proxy for the has-many relation `name`.
    pub fn has_many(&mut self, name: &str) -> Result<HasMany<'_>> {
        let spec = self.model.association(name).ok_or_else(|| {
            Error::invalid_operation(format!(
                "model `{}` has no association `{name}`",
                self.model.name()
            ))
        })?;

        Ok(HasMany::new(self, spec))
    }

    /// Children of the relation `name`, loading them on first access.
    pub fn association(&mut self, name: &str) -> Result<&[Document]> {
        self.has_many(name)?.load(false)?;
        Ok(self.memoized(name).unwrap_or(&[]))
    }

    /// Mutable access to the memoized children of `name`, loading them on
    /// first access.
    pub fn association_mut(&mut self, name: &str) -> Result<&mut Vec<Document>> {
        self.has_many(name)?.load(false)?;
        Ok(self.associations.entry(name.to_string()).or_default())
    }

    /// Replaces the children of the relation `name`. Nothing is persisted
    /// until the owner is saved.
    pub fn set_association(&mut self, name: &str, candidates: Vec<Attributes>) -> Result<()> {
        self.has_many(name)?.set(candidates)
    }

    /// Memoized children of `name`, without loading.
    pub fn memoized(&self, name: &str) -> Option<&[Document]> {
        self.associations.get(name).map(Vec::as_slice)
    }

    pub(crate) fn replace_attributes(&mut self, attributes: Attributes) {
        self.attributes = attributes;
        self.snapshot = self.attributes.clone();
        self.loaded = true;
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.destroyed = true;
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Document) -> bool {
        match (self.id(), other.id()) {
            (None, None) => self.attributes == other.attributes,
            (id, other_id) => {
                let same_binding = match (self.effective_binding(), other.effective_binding()) {
                    (None, None) => true,
                    (Some(a), Some(b)) => a.ptr_eq(&b),
                    _ => false,
                };

                same_binding && id == other_id
            }
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Document")
            .field("model", &self.model.name())
            .field("attributes", &self.attributes)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}
