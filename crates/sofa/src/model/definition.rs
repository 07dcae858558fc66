use super::AfterInitialize;
use crate::{callbacks::Callbacks, relation::HasManySpec, validation::Validator, Database};

use indexmap::IndexMap;
use sofa_core::PropertySchema;

use std::sync::Arc;

/// Everything declared on a model after it was created.
#[derive(Clone, Default)]
pub(crate) struct Definition {
    pub(crate) properties: PropertySchema,

    pub(crate) validators: Vec<Validator>,

    pub(crate) callbacks: Callbacks,

    /// Declared has-many relations, by relation name
    pub(crate) associations: IndexMap<String, Arc<HasManySpec>>,

    pub(crate) after_initialize: Option<AfterInitialize>,

    /// Natural key used by `find_by`
    pub(crate) find_by_attributes: Vec<String>,

    /// Default binding for new and loaded documents
    pub(crate) database: Option<Database>,
}

impl Definition {
    /// The starting definition of a subclass: an independent copy of this
    /// one. Closures are shared, the containers holding them are not.
    pub(crate) fn derive(&self) -> Definition {
        self.clone()
    }
}
