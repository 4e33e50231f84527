/*
 * Responsibility
 * - Projection used by GET /services/{id}
 */
use serde::Serialize;
use serde_json::Value;

use crate::repos::StoredDocument;

/// `{_id, title, price, service_id, img}`; fields missing from the stored
/// document are left out rather than sent as null.
#[derive(Debug, Serialize)]
pub struct ServiceSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<Value>,
}

impl From<StoredDocument> for ServiceSummary {
    fn from(entry: StoredDocument) -> Self {
        let StoredDocument { id, mut body } = entry;

        Self {
            id: id.to_string(),
            title: body.remove("title"),
            price: body.remove("price"),
            service_id: body.remove("service_id"),
            img: body.remove("img"),
        }
    }
}
