pub mod attributes;
pub use attributes::{Attributes, Value};

pub mod driver;
pub use driver::Driver;

mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::PropertySchema;

/// A Result type alias that uses Sofa's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
