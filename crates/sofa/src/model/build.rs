use super::Model;
use crate::{Attributes, Database, Document, Result, Value};

/// Options for constructing a document.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// The attributes come from storage: assign them as is, without
    /// coercion, and treat them as the persisted state.
    pub directly_set_attributes: bool,

    /// Bind the document to this database instead of the model default.
    pub database: Option<Database>,
}

impl BuildOptions {
    pub fn new() -> BuildOptions {
        BuildOptions::default()
    }

    pub fn directly_set_attributes(mut self, value: bool) -> BuildOptions {
        self.directly_set_attributes = value;
        self
    }

    pub fn database(mut self, db: &Database) -> BuildOptions {
        self.database = Some(db.clone());
        self
    }
}

impl Model {
    /// A new document from untrusted input.
    pub fn build(&self, attributes: Attributes) -> Result<Document> {
        self.new_document(attributes, BuildOptions::default())
    }

    /// A new document from untrusted input, handed to `init` before the
    /// initialize callbacks run.
    pub fn build_with<F>(&self, attributes: Attributes, mut init: F) -> Result<Document>
    where
        F: FnMut(&mut Document),
    {
        Document::construct(
            self.clone(),
            attributes,
            BuildOptions::default(),
            Some(&mut init),
        )
    }

    /// A document of exactly this model.
    pub fn new_document(&self, attributes: Attributes, options: BuildOptions) -> Result<Document> {
        Document::construct(self.clone(), attributes, options, None)
    }

    /// Builds a document read from storage, resolving its concrete model
    /// from the stored discriminator.
    ///
    /// A missing or blank discriminator, or one naming this model, builds
    /// this model. Any other value must name a registered model; when it
    /// does not, nothing is built and `Ok(None)` is returned. The attributes
    /// are always treated as trusted.
    pub fn build_from_database(
        &self,
        raw: Attributes,
        options: BuildOptions,
    ) -> Result<Option<Document>> {
        let Some(model) = self.resolve_stored(&raw) else {
            return Ok(None);
        };

        let options = options.directly_set_attributes(true);
        Document::construct(model, raw, options, None).map(Some)
    }

    fn resolve_stored(&self, raw: &Attributes) -> Option<Model> {
        let discriminator = match raw.get(self.model_type_key()) {
            None | Some(Value::Null) => return Some(self.clone()),
            Some(Value::String(name)) if std_util::str::is_blank(name) => {
                return Some(self.clone())
            }
            Some(Value::String(name)) if name == self.type_value() => return Some(self.clone()),
            Some(value) => value,
        };

        let resolved = discriminator.as_str().and_then(|name| self.resolve(name));

        if resolved.is_none() {
            tracing::debug!(
                model = %self.name(),
                discriminator = %discriminator,
                "could not resolve stored type"
            );
        }

        resolved
    }
}
