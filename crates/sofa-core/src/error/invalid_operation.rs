use super::Error;

/// Error when an operation is not allowed in the document's current state.
///
/// This occurs when:
/// - Saving or destroying a document that was already destroyed
/// - Destroying or reloading a document that was never saved
/// - Persisting a document that has no database binding
#[derive(Debug)]
pub(super) struct InvalidOperation {
    message: Box<str>,
}

impl std::error::Error for InvalidOperation {}

impl core::fmt::Display for InvalidOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid operation: {}", self.message)
    }
}

impl Error {
    pub fn invalid_operation(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidOperation(InvalidOperation {
            message: message.into().into(),
        }))
    }

    pub fn is_invalid_operation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidOperation(_))
    }
}
