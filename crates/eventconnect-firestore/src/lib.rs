//! Firestore write path for the importer.
//!
//! [`EventSink`] is the seam between the import loop and the store. The real
//! implementation, [`FirestoreEventSink`], authenticates with a service
//! account and issues one `commit` per event; [`NoopEventSink`] accepts
//! everything without a connection and backs `--dry-run`.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use google_firestore1::{
    api::{ArrayValue, CommitRequest, Document, FieldTransform, Precondition, Value, Write},
    hyper::{client::HttpConnector, Client},
    hyper_rustls::{HttpsConnector, HttpsConnectorBuilder},
    oauth2::{read_service_account_key, ServiceAccountAuthenticator},
    Firestore,
};
use rand::{distributions::Alphanumeric, Rng};

use eventconnect_core::event::EventDocument;

pub mod error;
pub use error::{Result, StoreError};

/// Destination for derived event documents.
#[async_trait]
pub trait EventSink {
    /// Creates one new document for `doc` and returns the id it was stored
    /// under. Each call is an independent write; the store never sees the
    /// rest of the batch.
    async fn create_event(&self, doc: &EventDocument) -> Result<String>;
}

/// Sink backed by a Cloud Firestore database.
pub struct FirestoreEventSink {
    hub: Firestore<HttpsConnector<HttpConnector>>,
    database: String,
    collection: String,
}

impl FirestoreEventSink {
    /// Reads the service-account key, builds an authenticated hub, and
    /// derives the database path from the key's `project_id`.
    pub async fn connect(credentials_path: &Path, collection: &str) -> Result<Self> {
        let key = read_service_account_key(credentials_path)
            .await
            .map_err(StoreError::Credentials)?;
        let project_id = key.project_id.clone().ok_or(StoreError::MissingProjectId)?;

        let auth = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(StoreError::Credentials)?;

        let connector = HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(StoreError::Tls)?
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .build();

        let hub = Firestore::new(Client::builder().build(connector), auth);

        Ok(Self {
            hub,
            database: format!("projects/{project_id}/databases/(default)"),
            collection: collection.to_string(),
        })
    }
}

#[async_trait]
impl EventSink for FirestoreEventSink {
    async fn create_event(&self, doc: &EventDocument) -> Result<String> {
        let doc_id = auto_id();
        let request = CommitRequest {
            writes: Some(vec![event_write(
                &self.database,
                &self.collection,
                &doc_id,
                doc,
            )]),
            ..Default::default()
        };

        self.hub
            .projects()
            .databases_documents_commit(request, &self.database)
            .doit()
            .await?;

        Ok(doc_id)
    }
}

/// Sink that accepts every document without touching a store.
pub struct NoopEventSink;

#[async_trait]
impl EventSink for NoopEventSink {
    async fn create_event(&self, _doc: &EventDocument) -> Result<String> {
        Ok(auto_id())
    }
}

/// 20-character alphanumeric document id, the same scheme the official
/// client SDKs generate for `add()`. The id is paired with an
/// `exists: false` precondition, so a collision fails the write instead of
/// overwriting an existing document.
fn auto_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(20)
        .map(char::from)
        .collect()
}

/// Builds the single commit write for one event: a create of the document
/// under `collection`, plus a transform that sets `createdAt` to the
/// server's request time. The importer's own clock is never used.
fn event_write(database: &str, collection: &str, doc_id: &str, doc: &EventDocument) -> Write {
    Write {
        update: Some(Document {
            name: Some(format!("{database}/documents/{collection}/{doc_id}")),
            fields: Some(document_fields(doc)),
            ..Default::default()
        }),
        update_transforms: Some(vec![FieldTransform {
            field_path: Some("createdAt".to_string()),
            set_to_server_value: Some("REQUEST_TIME".to_string()),
            ..Default::default()
        }]),
        current_document: Some(Precondition {
            exists: Some(false),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn document_fields(doc: &EventDocument) -> HashMap<String, Value> {
    HashMap::from([
        ("title".to_string(), string_value(&doc.title)),
        ("description".to_string(), string_value(&doc.description)),
        ("date".to_string(), string_value(&doc.date)),
        ("location".to_string(), string_value(&doc.location)),
        ("category".to_string(), string_value(&doc.category)),
        ("email".to_string(), string_value(&doc.email)),
        ("imageUrls".to_string(), string_array(&doc.image_urls)),
        ("organizerId".to_string(), string_value(&doc.organizer_id)),
        (
            "interestedUserEmails".to_string(),
            string_array(&doc.interested_user_emails),
        ),
        (
            "interestedUserIds".to_string(),
            string_array(&doc.interested_user_ids),
        ),
        (
            "interestedUsers".to_string(),
            string_array(&doc.interested_users),
        ),
    ])
}

fn string_value(s: &str) -> Value {
    Value {
        string_value: Some(s.to_string()),
        ..Default::default()
    }
}

fn string_array(items: &[String]) -> Value {
    Value {
        array_value: Some(ArrayValue {
            values: Some(items.iter().map(|s| string_value(s)).collect()),
        }),
        ..Default::default()
    }
}
