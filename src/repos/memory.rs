//! In-memory document store.
//!
//! Same contract as the PostgreSQL repos. Used for `STORAGE_BACKEND=memory`
//! (local development without a database) and by the router tests.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::{
    booking_repo::{BookingRepo, UpdateOutcome},
    document::{Document, StoredDocument},
    error::RepoError,
    service_repo::ServiceRepo,
};

#[derive(Debug, Default)]
pub struct MemoryServiceRepo {
    entries: RwLock<Vec<StoredDocument>>,
}

impl MemoryServiceRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the catalog; each entry gets a fresh id.
    pub fn with_entries(entries: impl IntoIterator<Item = Document>) -> Self {
        let entries = entries
            .into_iter()
            .map(|body| StoredDocument::new(Uuid::new_v4(), body))
            .collect();

        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl ServiceRepo for MemoryServiceRepo {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<StoredDocument>, RepoError> {
        Ok(self.entries.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<StoredDocument>, RepoError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .find(|entry| entry.id == id)
            .cloned())
    }
}

#[derive(Debug, Default)]
pub struct MemoryBookingRepo {
    bookings: RwLock<Vec<StoredDocument>>,
}

impl MemoryBookingRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepo for MemoryBookingRepo {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, owner: Option<&str>) -> Result<Vec<StoredDocument>, RepoError> {
        let bookings = self.bookings.read().await;

        Ok(bookings
            .iter()
            .filter(|booking| match owner {
                Some(owner) => booking.get("email").and_then(Value::as_str) == Some(owner),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn create(&self, body: Document) -> Result<Uuid, RepoError> {
        let stored = StoredDocument::new(Uuid::new_v4(), body);
        let id = stored.id;
        self.bookings.write().await.push(stored);
        Ok(id)
    }

    async fn update_status(&self, id: Uuid, status: Value) -> Result<UpdateOutcome, RepoError> {
        let mut bookings = self.bookings.write().await;

        let Some(booking) = bookings.iter_mut().find(|booking| booking.id == id) else {
            return Ok(UpdateOutcome::default());
        };

        if booking.body.get("status") == Some(&status) {
            return Ok(UpdateOutcome {
                matched: 1,
                modified: 0,
            });
        }

        booking.body.insert("status".to_string(), status);
        Ok(UpdateOutcome {
            matched: 1,
            modified: 1,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepoError> {
        let mut bookings = self.bookings.write().await;
        let before = bookings.len();
        bookings.retain(|booking| booking.id != id);
        Ok((before - bookings.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[tokio::test]
    async fn list_filters_by_owner_email() {
        let repo = MemoryBookingRepo::new();
        repo.create(doc(json!({"email": "a@x.com", "service": "oil"})))
            .await
            .unwrap();
        repo.create(doc(json!({"email": "b@x.com", "service": "brakes"})))
            .await
            .unwrap();

        let mine = repo.list(Some("a@x.com")).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].get("service"), Some(&json!("oil")));

        assert_eq!(repo.list(None).await.unwrap().len(), 2);
        assert!(repo.list(Some("c@x.com")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn owner_filter_only_matches_string_emails() {
        let repo = MemoryBookingRepo::new();
        repo.create(doc(json!({"email": 5, "service": "oil"})))
            .await
            .unwrap();
        repo.create(doc(json!({"email": "5", "service": "brakes"})))
            .await
            .unwrap();

        let matched = repo.list(Some("5")).await.unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].get("service"), Some(&json!("brakes")));
    }

    #[tokio::test]
    async fn update_status_reports_matched_and_modified() {
        let repo = MemoryBookingRepo::new();
        let id = repo
            .create(doc(json!({"email": "a@x.com", "status": "pending"})))
            .await
            .unwrap();

        let outcome = repo.update_status(id, json!("confirm")).await.unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 1 });

        let outcome = repo.update_status(id, json!("confirm")).await.unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 0 });

        let outcome = repo
            .update_status(Uuid::new_v4(), json!("confirm"))
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::default());

        let stored = repo.list(None).await.unwrap();
        assert_eq!(stored[0].get("status"), Some(&json!("confirm")));
        assert_eq!(stored[0].get("email"), Some(&json!("a@x.com")));
    }

    #[tokio::test]
    async fn delete_removes_once() {
        let repo = MemoryBookingRepo::new();
        let id = repo.create(doc(json!({"email": "a@x.com"}))).await.unwrap();

        assert_eq!(repo.delete(id).await.unwrap(), 1);
        assert_eq!(repo.delete(id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn catalog_lookup_by_id() {
        let repo = MemoryServiceRepo::with_entries([doc(json!({"title": "Oil change"}))]);
        let id = repo.list().await.unwrap()[0].id;

        let entry = repo.get(id).await.unwrap().unwrap();
        assert_eq!(entry.get("title"), Some(&json!("Oil change")));
        assert!(repo.get(Uuid::new_v4()).await.unwrap().is_none());
    }
}
