use crate::{Attributes, Error, Result, Value};

use sofa_core::{
    driver::{
        operation::{DeleteDoc, GetDoc, QueryView, SaveDoc},
        Ack, Driver, Operation, Response,
    },
    err,
};

use std::{
    fmt,
    sync::{Arc, Weak},
};

/// Handle to one logical document store.
///
/// Cloning is cheap and every clone refers to the same store. Two handles
/// compare equal only when they point at the same store, which is what
/// document equality relies on to tell apart documents sharing an id in
/// different databases.
#[derive(Clone)]
pub struct Database {
    shared: Arc<Shared>,
}

/// Non-owning reference to a [`Database`], held by documents.
#[derive(Clone, Default)]
pub struct WeakDatabase {
    shared: Weak<Shared>,
}

struct Shared {
    name: String,
    driver: Box<dyn Driver>,
}

impl Database {
    pub fn new(name: impl Into<String>, driver: impl Driver) -> Database {
        Database {
            shared: Arc::new(Shared {
                name: name.into(),
                driver: Box::new(driver),
            }),
        }
    }

    /// Opens a database from a URL.
    ///
    /// `memory://<name>` opens a fresh in-memory store (requires the
    /// `memory` feature).
    pub fn connect(url: &str) -> Result<Database> {
        let url = url::Url::parse(url).map_err(Error::driver)?;

        let name = url
            .host_str()
            .map(str::to_string)
            .unwrap_or_else(|| url.path().trim_start_matches('/').to_string());

        match url.scheme() {
            #[cfg(feature = "memory")]
            "memory" => Ok(Database::new(name, sofa_driver_memory::Memory::new())),
            scheme => Err(err!("unsupported database scheme `{scheme}`")),
        }
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    /// Execute a raw driver operation
    pub fn exec(&self, operation: impl Into<Operation>) -> Result<Response> {
        let operation = operation.into();
        tracing::trace!(db = %self.shared.name, ?operation, "exec");
        self.shared.driver.exec(operation)
    }

    /// Write a full document. The acknowledgement carries the new revision.
    pub fn save_doc(&self, doc: Attributes) -> Result<Ack> {
        self.exec(SaveDoc { doc })?.into_saved()
    }

    pub fn get(&self, id: &str) -> Result<Option<Attributes>> {
        self.exec(GetDoc { id: id.to_string() })?.into_doc()
    }

    pub fn delete_doc(&self, id: &str, rev: &str) -> Result<Ack> {
        self.exec(DeleteDoc {
            id: id.to_string(),
            rev: rev.to_string(),
        })?
        .into_deleted()
    }

    pub fn view(&self, query: QueryView) -> Result<Vec<Attributes>> {
        self.exec(query)?.into_rows()
    }

    /// Run a view owned by `model`, keyed by `key`.
    pub fn find_by_view(
        &self,
        model: &str,
        model_type_key: &str,
        view: &str,
        key: Value,
    ) -> Result<Vec<Attributes>> {
        self.view(QueryView {
            model: model.to_string(),
            model_type_key: model_type_key.to_string(),
            view: view.to_string(),
            key,
        })
    }

    /// Drop every document in the store.
    pub fn reset(&self) -> Result<()> {
        self.shared.driver.reset()
    }

    pub fn downgrade(&self) -> WeakDatabase {
        WeakDatabase {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// True when both handles refer to the same store.
    pub fn ptr_eq(&self, other: &Database) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl WeakDatabase {
    pub fn upgrade(&self) -> Option<Database> {
        self.shared.upgrade().map(|shared| Database { shared })
    }

    /// True when both references point at the same store, even if it was
    /// dropped.
    pub fn ptr_eq(&self, other: &WeakDatabase) -> bool {
        self.shared.ptr_eq(&other.shared)
    }
}

impl PartialEq for Database {
    fn eq(&self, other: &Database) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Database {}

impl fmt::Debug for Database {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Database")
            .field("name", &self.shared.name)
            .field("driver", &self.shared.driver)
            .finish()
    }
}

impl fmt::Debug for WeakDatabase {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(db) => write!(fmt, "WeakDatabase({:?})", db.name()),
            None => fmt.write_str("WeakDatabase(<dropped>)"),
        }
    }
}
