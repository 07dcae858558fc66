mod callbacks;
pub use callbacks::{Callback, Phase};

pub mod db;
pub use db::{Database, WeakDatabase};

mod document;
pub use document::Document;

pub mod model;
pub use model::{BuildOptions, Model};

pub mod registry;
pub use registry::Registry;

pub mod relation;
pub use relation::{Dependent, HasMany, HasManyOptions, HasManySpec};

mod validation;
pub use validation::Validator;

pub use sofa_core::{
    driver,
    schema::{self, Property, PropertySchema, PropertyTy},
    Attributes, Error, Result, Value,
};
