//! Named lifecycle callbacks.

use crate::{Document, Result};

use std::{fmt, sync::Arc};

/// Lifecycle phase a callback runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// After construction, once the document is fully assembled
    Initialize,
    BeforeSave,
    AfterSave,
    BeforeDestroy,
    AfterDestroy,
}

type CallbackFn = dyn Fn(&mut Document) -> Result<bool> + Send + Sync;

/// A named callback. Returning `Ok(false)` halts the rest of the chain.
#[derive(Clone)]
pub struct Callback {
    name: String,
    f: Arc<CallbackFn>,
}

impl Callback {
    pub fn new<F>(name: impl Into<String>, f: F) -> Callback
    where
        F: Fn(&mut Document) -> Result<bool> + Send + Sync + 'static,
    {
        Callback {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, doc: &mut Document) -> Result<bool> {
        (self.f)(doc)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_tuple("Callback").field(&self.name).finish()
    }
}

/// Callback chains for every phase of one model.
#[derive(Debug, Clone, Default)]
pub(crate) struct Callbacks {
    initialize: Vec<Callback>,
    before_save: Vec<Callback>,
    after_save: Vec<Callback>,
    before_destroy: Vec<Callback>,
    after_destroy: Vec<Callback>,
}

impl Callbacks {
    fn phase_mut(&mut self, phase: Phase) -> &mut Vec<Callback> {
        match phase {
            Phase::Initialize => &mut self.initialize,
            Phase::BeforeSave => &mut self.before_save,
            Phase::AfterSave => &mut self.after_save,
            Phase::BeforeDestroy => &mut self.before_destroy,
            Phase::AfterDestroy => &mut self.after_destroy,
        }
    }

    pub(crate) fn chain(&self, phase: Phase) -> &[Callback] {
        match phase {
            Phase::Initialize => &self.initialize,
            Phase::BeforeSave => &self.before_save,
            Phase::AfterSave => &self.after_save,
            Phase::BeforeDestroy => &self.before_destroy,
            Phase::AfterDestroy => &self.after_destroy,
        }
    }

    /// Appends `callback`, or replaces the entry with the same name in place.
    pub(crate) fn set(&mut self, phase: Phase, callback: Callback) {
        let chain = self.phase_mut(phase);

        match chain.iter_mut().find(|c| c.name == callback.name) {
            Some(existing) => *existing = callback,
            None => chain.push(callback),
        }
    }

    pub(crate) fn remove(&mut self, phase: Phase, name: &str) -> bool {
        let chain = self.phase_mut(phase);
        let len = chain.len();
        chain.retain(|c| c.name != name);
        chain.len() != len
    }
}

/// Runs the `phase` chain of the document's model against `doc`.
///
/// The chain is cloned out of the model first so callbacks are free to
/// touch the model definition. Stops at the first callback returning
/// `Ok(false)` or an error.
pub(crate) fn run(phase: Phase, doc: &mut Document) -> Result<bool> {
    let chain = doc.model().definition().callbacks.chain(phase).to_vec();

    for callback in &chain {
        if !callback.call(doc)? {
            tracing::debug!(
                model = %doc.model().name(),
                id = ?doc.id(),
                ?phase,
                callback = %callback.name(),
                "callback halted chain"
            );
            return Ok(false);
        }
    }

    Ok(true)
}
