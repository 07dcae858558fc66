mod delete_doc;
pub use delete_doc::DeleteDoc;

mod get_doc;
pub use get_doc::GetDoc;

mod query_view;
pub use query_view::QueryView;

mod save_doc;
pub use save_doc::SaveDoc;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Write a full document. Creates it when it carries no revision.
    SaveDoc(SaveDoc),

    /// Fetch one document by id
    GetDoc(GetDoc),

    /// Delete one document at a known revision
    DeleteDoc(DeleteDoc),

    /// Run a view of a model's design document for a single key
    QueryView(QueryView),
}

impl Operation {
    pub fn is_save_doc(&self) -> bool {
        matches!(self, Self::SaveDoc(_))
    }

    pub fn is_get_doc(&self) -> bool {
        matches!(self, Self::GetDoc(_))
    }

    pub fn is_delete_doc(&self) -> bool {
        matches!(self, Self::DeleteDoc(_))
    }

    pub fn is_query_view(&self) -> bool {
        matches!(self, Self::QueryView(_))
    }
}
