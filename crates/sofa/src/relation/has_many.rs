use super::HasManySpec;
use crate::{Attributes, BuildOptions, Document, Error, Model, Result, Value};

use std::{fmt, sync::Arc};

/// Proxy for one has-many relation of one owner document.
///
/// Children are memoized on the owner. The first read loads them from the
/// owner's database through the `by_<foreign_key>` view; later reads return
/// the memoized list until it is reloaded or replaced.
pub struct HasMany<'a> {
    owner: &'a mut Document,
    spec: Arc<HasManySpec>,
}

impl fmt::Debug for HasMany<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HasMany")
            .field("relation", &self.spec.name)
            .field("owner", &self.owner.id())
            .finish()
    }
}

impl<'a> HasMany<'a> {
    pub(crate) fn new(owner: &'a mut Document, spec: Arc<HasManySpec>) -> HasMany<'a> {
        HasMany { owner, spec }
    }

    pub fn spec(&self) -> &HasManySpec {
        &self.spec
    }

    /// The model children are resolved to.
    pub fn target(&self) -> Result<Model> {
        self.owner
            .model()
            .resolve(&self.spec.proxy)
            .ok_or_else(|| Error::unknown_model(&self.spec.proxy))
    }

    /// Children without loading, if any were memoized.
    pub fn cached(&self) -> Option<&[Document]> {
        self.owner.memoized(&self.spec.name)
    }

    /// The children, loaded on first access.
    pub fn get(&mut self) -> Result<&[Document]> {
        self.load(false)?;
        Ok(self.cached().unwrap_or(&[]))
    }

    /// The children, always queried again.
    pub fn reload(&mut self) -> Result<&[Document]> {
        self.load(true)?;
        Ok(self.cached().unwrap_or(&[]))
    }

    /// Ids of the memoized children that have one.
    pub fn ids(&self) -> Vec<String> {
        self.cached()
            .unwrap_or(&[])
            .iter()
            .filter_map(|child| child.id().map(str::to_string))
            .collect()
    }

    /// Memoizes the children unless a non-empty list already is and
    /// `reload` is false. An owner without an id has no children and is not
    /// queried.
    pub fn load(&mut self, reload: bool) -> Result<()> {
        if !reload && self.cached().is_some_and(|children| !children.is_empty()) {
            return Ok(());
        }

        let children = match self.owner.id() {
            Some(id) => {
                let id = id.to_string();
                let db = self.owner.require_database()?;
                self.target()?.by_view(&db, &self.spec.view_name(), id)?
            }
            None => vec![],
        };

        self.owner
            .associations
            .insert(self.spec.name.clone(), children);
        Ok(())
    }

    /// Replaces the children with the documents `candidates` describe.
    ///
    /// Each candidate is pointed at the owner, then found by id or natural
    /// key or else built new, and the candidate attributes are written onto
    /// it. Nothing is persisted.
    pub fn set(&mut self, candidates: Vec<Attributes>) -> Result<()> {
        let target = self.target()?;
        let db = self.owner.database();
        let owner_id = self.owner.id().map_or(Value::Null, Value::from);
        let foreign_key = &self.spec.foreign_key;

        let mut children = Vec::with_capacity(candidates.len());

        for mut attributes in candidates {
            attributes.insert(foreign_key.clone(), owner_id.clone());

            let mut child = match &db {
                Some(db) => target.find_or_initialize_by(db, attributes.clone())?,
                None => target.new_document(attributes.clone(), BuildOptions::new())?,
            };

            child.set(foreign_key, owner_id.clone())?;
            child.write_attributes(attributes)?;
            children.push(child);
        }

        self.owner
            .associations
            .insert(self.spec.name.clone(), children);
        Ok(())
    }

    /// Saves every memoized child with its foreign key pointing at the
    /// owner, then records the child ids on the owner.
    ///
    /// Stops at the first child that fails to save. In that case the owner's
    /// id list is not written, so the owner never references a child that
    /// was not stored. A relation that was never loaded or assigned has
    /// nothing to save and is not queried.
    pub fn save_all(&mut self) -> Result<bool> {
        if self.cached().is_none() {
            return Ok(true);
        }

        let owner_id = self.owner.id().map(str::to_string).ok_or_else(|| {
            Error::invalid_operation(format!(
                "cannot save `{}` of an unsaved owner",
                self.spec.name
            ))
        })?;

        let spec = self.spec.clone();
        let children = self
            .owner
            .associations
            .entry(spec.name.clone())
            .or_default();

        for child in children.iter_mut() {
            child.set(&spec.foreign_key, owner_id.as_str())?;

            if !abort_on_failure(&spec, "save", child, Document::save)? {
                return Ok(false);
            }
        }

        let ids = children
            .iter()
            .filter_map(Document::id)
            .map(Value::from)
            .collect::<Vec<_>>();

        self.owner.set(&spec.collection_of, Value::Array(ids))?;

        if self.owner.changes().is_empty() {
            return Ok(true);
        }

        self.owner.persist()
    }

    /// Destroys every stored child, in order.
    ///
    /// The first child that cannot be destroyed halts the cascade; the
    /// remaining children are left untouched.
    pub fn destroy_all(&mut self) -> Result<bool> {
        self.load(false)?;

        let spec = self.spec.clone();
        let Some(children) = self.owner.associations.get_mut(&spec.name) else {
            return Ok(true);
        };

        for child in children.iter_mut() {
            if child.is_new() || child.is_destroyed() {
                continue;
            }

            if !abort_on_failure(&spec, "destroy", child, Document::destroy)? {
                return Ok(false);
            }
        }

        children.clear();
        Ok(true)
    }

    /// Clears the foreign key of every child and saves the stored ones.
    ///
    /// The first child that fails to save halts the cascade.
    pub fn nullify_all(&mut self) -> Result<bool> {
        self.load(false)?;

        let spec = self.spec.clone();
        let Some(children) = self.owner.associations.get_mut(&spec.name) else {
            return Ok(true);
        };

        for child in children.iter_mut() {
            child.set(&spec.foreign_key, Value::Null)?;

            if child.is_new() {
                continue;
            }

            if !abort_on_failure(&spec, "nullify", child, Document::save)? {
                return Ok(false);
            }
        }

        children.clear();
        Ok(true)
    }
}

/// Runs one cascade step, logging when it fails.
fn abort_on_failure(
    spec: &HasManySpec,
    step: &str,
    child: &mut Document,
    f: impl FnOnce(&mut Document) -> Result<bool>,
) -> Result<bool> {
    match f(child) {
        Ok(true) => Ok(true),
        Ok(false) => {
            tracing::warn!(
                relation = %spec.name,
                step,
                child = ?child.id(),
                "cascade aborted"
            );
            Ok(false)
        }
        Err(err) => {
            tracing::warn!(
                relation = %spec.name,
                step,
                child = ?child.id(),
                %err,
                "cascade aborted"
            );
            Err(err)
        }
    }
}
