use super::Error;

/// Error when a value fails coercion or a model validator rejects a document.
#[derive(Debug)]
pub(super) struct ValidationError {
    attribute: Box<str>,
    message: Box<str>,
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "validation failed for `{}`: {}",
            self.attribute, self.message
        )
    }
}

impl Error {
    /// Creates a validation error for the named attribute.
    pub fn validation(attribute: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            attribute: attribute.into().into(),
            message: message.into().into(),
        }))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Validation(_))
    }
}
