mod has_many;
pub use has_many::HasMany;

mod spec;
pub use spec::{Dependent, HasManyOptions, HasManySpec};
