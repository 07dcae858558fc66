use crate::{Document, Result};

use std::{fmt, sync::Arc};

type CheckFn = dyn Fn(&Document) -> Result<()> + Send + Sync;

/// A named document check. Failures are reported as validation errors.
#[derive(Clone)]
pub struct Validator {
    name: String,
    check: Arc<CheckFn>,
}

impl Validator {
    pub fn new<F>(name: impl Into<String>, check: F) -> Validator
    where
        F: Fn(&Document) -> Result<()> + Send + Sync + 'static,
    {
        Validator {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(&self, doc: &Document) -> Result<()> {
        (self.check)(doc)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_tuple("Validator").field(&self.name).finish()
    }
}
