use super::{BuildOptions, Model};
use crate::{Attributes, Database, Document, Error, Result, Value};

use sofa_core::attributes::{self, ID};

impl Model {
    /// Loads a document by id, resolving its concrete model. Returns
    /// `Ok(None)` if there is no such document or its type is unknown.
    pub fn get(&self, db: &Database, id: &str) -> Result<Option<Document>> {
        match db.get(id)? {
            Some(raw) => self.build_from_database(raw, BuildOptions::new().database(db)),
            None => Ok(None),
        }
    }

    /// Like [`Model::get`], but a missing document is an error.
    pub fn find(&self, db: &Database, id: &str) -> Result<Document> {
        self.get(db, id)?
            .ok_or_else(|| Error::record_not_found(format!("model={} id={id}", self.name())))
    }

    /// True if a document with this id is stored with this model's type.
    pub fn exists(&self, db: &Database, id: &str) -> Result<bool> {
        Ok(db.get(id)?.is_some_and(|raw| {
            attributes::str_attr(&raw, self.model_type_key()) == Some(self.type_value())
        }))
    }

    /// Runs the view `view` over documents of this model and builds every
    /// row. Rows whose type cannot be resolved are skipped.
    pub fn by_view(&self, db: &Database, view: &str, key: impl Into<Value>) -> Result<Vec<Document>> {
        let rows = db.find_by_view(self.name(), self.model_type_key(), view, key.into())?;
        let options = BuildOptions::new().database(db);

        let mut docs = Vec::with_capacity(rows.len());
        for raw in rows {
            if let Some(doc) = self.build_from_database(raw, options.clone())? {
                docs.push(doc);
            }
        }

        Ok(docs)
    }

    /// Looks a document up by the natural key set with
    /// [`Model::find_by_attributes`].
    ///
    /// Returns `Ok(None)` without querying when no natural key is set or any
    /// of its values is missing or blank.
    pub fn find_by(&self, db: &Database, attributes: &Attributes) -> Result<Option<Document>> {
        let natural_key = self.natural_key();
        if natural_key.is_empty() {
            return Ok(None);
        }

        let mut values = Vec::with_capacity(natural_key.len());
        for name in &natural_key {
            let Some(value) = attributes.get(name).filter(|v| !attributes::is_blank(v)) else {
                return Ok(None);
            };

            let value = match self.definition().properties.get(name) {
                Some(property) => property.coerce(value.clone())?,
                None => value.clone(),
            };
            values.push(value);
        }

        let key = if values.len() == 1 {
            values.remove(0)
        } else {
            Value::Array(values)
        };

        let view = format!("by_{}", natural_key.join("_and_"));
        Ok(self.by_view(db, &view, key)?.into_iter().next())
    }

    /// Finds the document `attributes` describe, or builds a new one.
    ///
    /// Tries the `id` (or `_id`) attribute first, then the natural key, and
    /// finally builds an unsaved document from the attributes.
    pub fn find_or_initialize_by(&self, db: &Database, attributes: Attributes) -> Result<Document> {
        let id = attributes
            .get("id")
            .or_else(|| attributes.get(ID))
            .filter(|id| !attributes::is_blank(id))
            .map(attributes::to_key_string);

        if let Some(id) = id {
            if let Some(doc) = self.get(db, &id)? {
                return Ok(doc);
            }
        }

        if let Some(doc) = self.find_by(db, &attributes)? {
            return Ok(doc);
        }

        self.new_document(attributes, BuildOptions::new().database(db))
    }
}
