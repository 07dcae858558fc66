use parking_lot::Mutex;
use sofa_core::{
    driver::{Ack, Driver, Operation, Response},
    err, Result,
};
use std::{fmt, sync::Arc};

/// A driver wrapper that fails selected operations.
#[derive(Debug)]
pub struct FaultyDriver {
    inner: Box<dyn Driver>,
    faults: Faults,
}

/// Shared handle for arming failures on a [`FaultyDriver`].
#[derive(Clone, Default)]
pub struct Faults {
    rules: Arc<Mutex<Vec<Rule>>>,
}

struct Rule {
    matches: Box<dyn Fn(&Operation) -> bool + Send>,
    outcome: Outcome,
}

#[derive(Clone, Copy)]
enum Outcome {
    /// The store refuses the write (`ok: false`)
    Reject,

    /// The driver cannot perform the operation at all
    Error,
}

impl FaultyDriver {
    pub fn new(inner: Box<dyn Driver>, faults: Faults) -> FaultyDriver {
        FaultyDriver { inner, faults }
    }
}

impl Faults {
    /// Refuse deleting the document `id`.
    pub fn reject_delete_of(&self, id: &str) {
        let id = id.to_string();
        self.push(Outcome::Reject, move |op| {
            matches!(op, Operation::DeleteDoc(delete) if delete.id == id)
        });
    }

    /// Refuse saves whose document matches `predicate`.
    pub fn reject_save_when<F>(&self, predicate: F)
    where
        F: Fn(&sofa_core::Attributes) -> bool + Send + 'static,
    {
        self.push(Outcome::Reject, move |op| {
            matches!(op, Operation::SaveDoc(save) if predicate(&save.doc))
        });
    }

    /// Fail every operation matching `predicate` with a driver error.
    pub fn error_when<F>(&self, predicate: F)
    where
        F: Fn(&Operation) -> bool + Send + 'static,
    {
        self.push(Outcome::Error, predicate);
    }

    pub fn clear(&self) {
        self.rules.lock().clear();
    }

    fn push(&self, outcome: Outcome, matches: impl Fn(&Operation) -> bool + Send + 'static) {
        self.rules.lock().push(Rule {
            matches: Box::new(matches),
            outcome,
        });
    }

    fn check(&self, operation: &Operation) -> Option<Outcome> {
        self.rules
            .lock()
            .iter()
            .find(|rule| (rule.matches)(operation))
            .map(|rule| rule.outcome)
    }
}

impl Driver for FaultyDriver {
    fn exec(&self, operation: Operation) -> Result<Response> {
        match self.faults.check(&operation) {
            None => self.inner.exec(operation),
            Some(Outcome::Error) => Err(err!("injected failure for {operation:?}")),
            Some(Outcome::Reject) => match operation {
                Operation::SaveDoc(_) => Ok(Response::Saved(Ack::rejected("conflict"))),
                Operation::DeleteDoc(_) => Ok(Response::Deleted(Ack::rejected("conflict"))),
                operation => Err(err!("cannot reject {operation:?}")),
            },
        }
    }

    fn reset(&self) -> Result<()> {
        self.inner.reset()
    }
}

impl fmt::Debug for Faults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Faults")
            .field("rules", &self.rules.lock().len())
            .finish()
    }
}
