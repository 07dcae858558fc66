//! In-memory document store.
//!
//! Behaves like a single CouchDB database: the store assigns ids to new
//! documents, every write produces a new `N-<hex>` revision, and writes or
//! deletes against a stale revision are refused with a conflict. Views
//! follow the `by_<attr>[_and_<attr>]*` naming convention and only emit
//! documents whose discriminator equals the querying model.

mod revision;
use revision::Revision;

use indexmap::IndexMap;
use parking_lot::Mutex;
use sofa_core::{
    attributes::{self, Attributes, Value},
    driver::{
        operation::{DeleteDoc, GetDoc, QueryView, SaveDoc},
        Ack, Driver, Operation, Response,
    },
    Result,
};

#[derive(Debug, Default)]
pub struct Memory {
    store: Mutex<Store>,
}

#[derive(Debug, Default)]
struct Store {
    /// Documents in insertion order, keyed by id
    docs: IndexMap<String, Attributes>,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.store.lock().docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.store.lock().docs.contains_key(id)
    }
}

impl Driver for Memory {
    fn exec(&self, operation: Operation) -> Result<Response> {
        let mut store = self.store.lock();

        Ok(match operation {
            Operation::SaveDoc(op) => Response::Saved(store.save(op)),
            Operation::GetDoc(op) => Response::Doc(store.get(op)),
            Operation::DeleteDoc(op) => Response::Deleted(store.delete(op)),
            Operation::QueryView(op) => Response::Rows(store.query_view(op)),
        })
    }

    fn reset(&self) -> Result<()> {
        self.store.lock().docs.clear();
        Ok(())
    }
}

impl Store {
    fn save(&mut self, SaveDoc { mut doc }: SaveDoc) -> Ack {
        let id = match attributes::id(&doc) {
            Some(id) => id.to_string(),
            None => Revision::new_id(),
        };

        let current = self.docs.get(&id).and_then(|stored| attributes::rev(stored));

        let next = match (current, attributes::rev(&doc)) {
            (None, None) => Revision::first(),
            (Some(current), Some(given)) if current == given => {
                match Revision::parse(current) {
                    Some(rev) => rev.next(),
                    None => return Ack::rejected("bad_request"),
                }
            }
            // Either the document exists and the caller did not know, or the
            // caller's revision is stale or unknown.
            _ => return Ack::rejected("conflict"),
        };

        let rev = next.to_string();
        doc.insert(attributes::ID.to_string(), Value::String(id.clone()));
        doc.insert(attributes::REV.to_string(), Value::String(rev.clone()));
        self.docs.insert(id.clone(), doc);

        Ack::ok(id, rev)
    }

    fn get(&self, GetDoc { id }: GetDoc) -> Option<Attributes> {
        self.docs.get(&id).cloned()
    }

    fn delete(&mut self, DeleteDoc { id, rev }: DeleteDoc) -> Ack {
        let Some(stored) = self.docs.get(&id) else {
            return Ack::rejected("not_found");
        };

        if attributes::rev(stored) != Some(rev.as_str()) {
            return Ack::rejected("conflict");
        }

        let next = match Revision::parse(&rev) {
            Some(rev) => rev.next(),
            None => return Ack::rejected("bad_request"),
        };

        self.docs.shift_remove(&id);
        Ack::ok(id, next.to_string())
    }

    fn query_view(&self, op: QueryView) -> Vec<Attributes> {
        let keys = op.key_attributes();

        if keys.is_empty() {
            return vec![];
        }

        self.docs
            .values()
            .filter(|doc| attributes::str_attr(doc, &op.model_type_key) == Some(&op.model[..]))
            .filter(|doc| matches_key(doc, &keys, &op.key))
            .cloned()
            .collect()
    }
}

fn matches_key(doc: &Attributes, keys: &[&str], key: &Value) -> bool {
    let emitted = |name: &str| doc.get(name).unwrap_or(&Value::Null);

    match keys {
        [single] => emitted(single) == key,
        keys => match key {
            Value::Array(parts) if parts.len() == keys.len() => keys
                .iter()
                .zip(parts)
                .all(|(name, part)| emitted(name) == part),
            _ => false,
        },
    }
}
