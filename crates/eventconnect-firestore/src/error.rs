use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to load service account credentials: {0}")]
    Credentials(#[source] std::io::Error),
    #[error("Service account key has no project_id")]
    MissingProjectId,
    #[error("Failed to build TLS connector: {0}")]
    Tls(#[source] std::io::Error),
    #[error("Firestore write failed: {0}")]
    Write(#[from] google_firestore1::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
