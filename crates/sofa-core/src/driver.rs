mod response;
pub use response::{Ack, Response};

pub mod operation;
pub use operation::Operation;

use std::fmt::Debug;

/// A document store backend.
///
/// Drivers execute one [`Operation`] at a time to completion. A driver
/// returns `Err` only when it could not perform the operation at all;
/// storage-level refusals (revision conflicts, missing documents on
/// delete) are reported as a negative [`Ack`].
pub trait Driver: Debug + Send + Sync + 'static {
    /// Execute a storage operation
    fn exec(&self, operation: Operation) -> crate::Result<Response>;

    /// Remove every stored document. Used by test setups.
    fn reset(&self) -> crate::Result<()> {
        Ok(())
    }
}

impl<T: Driver + ?Sized> Driver for Box<T> {
    fn exec(&self, operation: Operation) -> crate::Result<Response> {
        (**self).exec(operation)
    }

    fn reset(&self) -> crate::Result<()> {
        (**self).reset()
    }
}
