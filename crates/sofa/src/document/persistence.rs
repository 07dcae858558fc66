use super::Document;
use crate::{
    callbacks::{self, Phase},
    Attributes, Error, Result, Value,
};

use sofa_core::attributes::{ID, REV};

impl Document {
    /// Validates and saves the document, running the save callbacks.
    ///
    /// Returns `Ok(false)` when a validator rejects the document, a
    /// `before_save` callback halts, the store refuses the write, or an
    /// `after_save` callback (such as an association autosave) fails. A
    /// persisted document without changes is not written again.
    pub fn save(&mut self) -> Result<bool> {
        if self.is_destroyed() {
            return Err(Error::invalid_operation(format!(
                "cannot save a destroyed `{}` document",
                self.model().name()
            )));
        }

        if let Err(err) = self.validate() {
            if err.is_validation() {
                tracing::debug!(model = %self.model().name(), id = ?self.id(), %err, "invalid document");
                return Ok(false);
            }
            return Err(err);
        }

        if !self.is_new() && !self.has_changes() {
            return Ok(true);
        }

        if !callbacks::run(Phase::BeforeSave, self)? {
            return Ok(false);
        }

        if !self.persist()? {
            return Ok(false);
        }

        callbacks::run(Phase::AfterSave, self)
    }

    /// Like [`Document::save`], but every failure is an error.
    pub fn save_strict(&mut self) -> Result<()> {
        self.validate()?;

        if self.save()? {
            Ok(())
        } else {
            Err(Error::invalid_operation(format!(
                "failed to save `{}` document {}",
                self.model().name(),
                self.id().unwrap_or("<new>")
            )))
        }
    }

    /// Mass-assigns `input` and saves.
    pub fn update_attributes(&mut self, input: Attributes) -> Result<bool> {
        self.write_attributes(input)?;
        self.save()
    }

    /// Writes the attribute map as is, without validation or callbacks.
    ///
    /// On success the store's id and revision are recorded and the current
    /// attributes become the persisted state.
    pub(crate) fn persist(&mut self) -> Result<bool> {
        let db = self.require_database()?;
        let ack = db.save_doc(self.to_attributes())?;

        if !ack.ok {
            tracing::debug!(
                model = %self.model().name(),
                id = ?self.id(),
                error = ?ack.error,
                "store rejected save"
            );
            return Ok(false);
        }

        if let Some(id) = ack.id {
            self.attributes.insert(ID.to_string(), Value::String(id));
        }

        if let Some(rev) = ack.rev {
            self.attributes.insert(REV.to_string(), Value::String(rev));
        }

        self.clear_changes();
        Ok(true)
    }

    /// Deletes the document, running the destroy callbacks.
    ///
    /// Returns `Ok(false)` when a `before_destroy` callback (such as a
    /// dependent cascade) halts or the store refuses the delete. Either way
    /// the document stays in storage.
    pub fn destroy(&mut self) -> Result<bool> {
        if self.is_destroyed() {
            return Err(Error::invalid_operation(format!(
                "`{}` document was already destroyed",
                self.model().name()
            )));
        }

        let (Some(id), Some(rev)) = (self.id(), self.rev()) else {
            return Err(Error::invalid_operation(format!(
                "cannot destroy a new `{}` document",
                self.model().name()
            )));
        };
        let (id, rev) = (id.to_string(), rev.to_string());

        if !callbacks::run(Phase::BeforeDestroy, self)? {
            return Ok(false);
        }

        let db = self.require_database()?;
        let ack = db.delete_doc(&id, &rev)?;

        if !ack.ok {
            tracing::debug!(
                model = %self.model().name(),
                %id,
                error = ?ack.error,
                "store rejected delete"
            );
            return Ok(false);
        }

        self.mark_destroyed();
        callbacks::run(Phase::AfterDestroy, self)?;
        Ok(true)
    }

    /// Reloads the attributes from storage and drops memoized children.
    pub fn reload(&mut self) -> Result<()> {
        let Some(id) = self.id().map(str::to_string) else {
            return Err(Error::invalid_operation(format!(
                "cannot reload a `{}` document without an id",
                self.model().name()
            )));
        };

        let db = self.require_database()?;
        let raw = db.get(&id)?.ok_or_else(|| {
            Error::record_not_found(format!("model={} id={id}", self.model().name()))
        })?;

        self.replace_attributes(raw);
        self.associations.clear();
        Ok(())
    }

    /// Stores the document under a different discriminator.
    ///
    /// The full attribute map is written with the discriminator replaced by
    /// `new_type`, bypassing validation and callbacks. A refusal from the
    /// store is reported as `Ok(false)` and leaves the document untouched.
    /// A document that was never saved takes the id the store assigned.
    pub fn change_type(&mut self, new_type: &str) -> Result<bool> {
        let db = self.require_database()?;

        let mut doc = self.to_attributes();
        doc.insert(
            self.model().model_type_key().to_string(),
            Value::from(new_type),
        );

        let ack = db.save_doc(doc)?;

        if !ack.ok {
            tracing::debug!(
                model = %self.model().name(),
                id = ?self.id(),
                new_type,
                error = ?ack.error,
                "store rejected type change"
            );
            return Ok(false);
        }

        if let Some(id) = ack.id {
            self.attributes.insert(ID.to_string(), Value::String(id));
        }

        if let Some(rev) = ack.rev {
            self.attributes.insert(REV.to_string(), Value::String(rev));
        }

        self.clear_changes();
        Ok(true)
    }
}
