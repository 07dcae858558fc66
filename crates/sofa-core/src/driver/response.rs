use crate::{Attributes, Error, Result};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Outcome of a save
    Saved(Ack),

    /// Outcome of a delete
    Deleted(Ack),

    /// A single document, or `None` when the id is unknown
    Doc(Option<Attributes>),

    /// View rows, in key order
    Rows(Vec<Attributes>),
}

/// Storage acknowledgement. `ok == false` is a soft failure: the store
/// refused the write and nothing changed.
///
/// Serializes to the `{"ok", "id", "rev", "error"}` shape document stores
/// answer writes with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ack {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Ack {
    pub fn ok(id: impl Into<String>, rev: impl Into<String>) -> Ack {
        Ack {
            ok: true,
            id: Some(id.into()),
            rev: Some(rev.into()),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Ack {
        Ack {
            ok: false,
            error: Some(error.into()),
            ..Ack::default()
        }
    }
}

impl Response {
    pub fn into_saved(self) -> Result<Ack> {
        match self {
            Response::Saved(ack) => Ok(ack),
            other => Err(unexpected("Saved", &other)),
        }
    }

    pub fn into_deleted(self) -> Result<Ack> {
        match self {
            Response::Deleted(ack) => Ok(ack),
            other => Err(unexpected("Deleted", &other)),
        }
    }

    pub fn into_doc(self) -> Result<Option<Attributes>> {
        match self {
            Response::Doc(doc) => Ok(doc),
            other => Err(unexpected("Doc", &other)),
        }
    }

    pub fn into_rows(self) -> Result<Vec<Attributes>> {
        match self {
            Response::Rows(rows) => Ok(rows),
            other => Err(unexpected("Rows", &other)),
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Response::Saved(_) => "Saved",
            Response::Deleted(_) => "Deleted",
            Response::Doc(_) => "Doc",
            Response::Rows(_) => "Rows",
        }
    }
}

fn unexpected(expected: &str, actual: &Response) -> Error {
    Error::invalid_result(format!(
        "expected {expected}, got {}",
        actual.variant_name()
    ))
}
