use stockbook_catalog::CatalogError;

/// Persistence-layer errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid product record: {0}")]
    InvalidData(String),

    #[error("failed to encode inventory: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("inventory file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
