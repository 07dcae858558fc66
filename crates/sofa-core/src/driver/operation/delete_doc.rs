use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteDoc {
    pub id: String,

    /// Revision the caller believes is current
    pub rev: String,
}

impl From<DeleteDoc> for Operation {
    fn from(value: DeleteDoc) -> Self {
        Self::DeleteDoc(value)
    }
}
