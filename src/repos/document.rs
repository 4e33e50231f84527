/*
 * Responsibility
 * - The schemaless document shape shared by both collections
 * - `_id` is owned by the server: stripped on the way in, added on the way out
 */
use serde_json::{Map, Value};
use uuid::Uuid;

pub type Document = Map<String, Value>;

pub const ID_FIELD: &str = "_id";

/// A document as stored, with its server-generated id kept out of the body.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub body: Document,
}

impl StoredDocument {
    pub fn new(id: Uuid, mut body: Document) -> Self {
        body.remove(ID_FIELD);
        Self { id, body }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.body.get(field)
    }

    /// Wire form: the body with `_id` set to the document id.
    pub fn into_document(self) -> Document {
        let mut doc = self.body;
        doc.insert(ID_FIELD.to_string(), Value::String(self.id.to_string()));
        doc
    }
}
