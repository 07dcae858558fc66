use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct GetDoc {
    pub id: String,
}

impl From<GetDoc> for Operation {
    fn from(value: GetDoc) -> Self {
        Self::GetDoc(value)
    }
}
