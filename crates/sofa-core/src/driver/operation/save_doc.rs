use super::*;

use crate::Attributes;

#[derive(Debug, Clone, PartialEq)]
pub struct SaveDoc {
    /// The complete document, including `_id`/`_rev` when known.
    pub doc: Attributes,
}

impl From<SaveDoc> for Operation {
    fn from(value: SaveDoc) -> Self {
        Self::SaveDoc(value)
    }
}
