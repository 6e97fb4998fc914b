use shared::domain::Product;
use thiserror::Error;
use tracing::{debug, warn};

use crate::KeyValueStore;

pub const PRODUCTS_KEY: &str = "products";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stored value under '{key}' is not a valid product list: {source}")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize product list: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, StoreError::Deserialization { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ProductStore<S> {
    backend: S,
}

impl<S: KeyValueStore> ProductStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Corrupt stored text is logged and read as an empty collection.
    pub async fn load(&self) -> Result<Vec<Product>, StoreError> {
        match self.load_strict().await {
            Err(err) if err.is_corrupt_data() => {
                warn!(key = PRODUCTS_KEY, error = %err, "discarding unreadable product list");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    pub async fn load_strict(&self) -> Result<Vec<Product>, StoreError> {
        let Some(raw) = self.backend.get(PRODUCTS_KEY).await? else {
            return Ok(Vec::new());
        };

        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Deserialization {
                key: PRODUCTS_KEY.to_string(),
                source,
            })?;
        debug!(count = products.len(), "loaded product list");
        Ok(products)
    }

    pub async fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(products)?;
        self.backend.set(PRODUCTS_KEY, &encoded).await?;
        debug!(count = products.len(), "saved product list");
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove(PRODUCTS_KEY).await?;
        Ok(())
    }

    pub async fn raw(&self) -> Result<Option<String>, StoreError> {
        Ok(self.backend.get(PRODUCTS_KEY).await?)
    }
}

#[cfg(test)]
#[path = "tests/products_tests.rs"]
mod tests;
