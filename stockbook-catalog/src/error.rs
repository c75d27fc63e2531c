/// Catalog-level errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("product with id '{0}' already exists")]
    DuplicateProduct(String),

    #[error("product with id '{0}' not found")]
    ProductNotFound(String),

    #[error("stock operation failed for product '{product_id}': {source}")]
    Stock {
        product_id: String,
        #[source]
        source: Box<CatalogError>,
    },
}
