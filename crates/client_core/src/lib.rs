use shared::{
    domain::{Priority, Product, ProductDraft, ProductId, Progress},
    error::ValidationError,
};
use storage::{KeyValueStore, ProductStore, StoreError};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod config;
pub mod ids;

pub use ids::{IdSource, MonotonicIds, SystemClockIds};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no unused product id is left")]
    IdsExhausted,
}

/// Each mutation persists the next collection first and only then swaps it in,
/// so a failed write leaves memory and store agreeing on the previous state.
pub struct ProductListController<S, I = MonotonicIds<SystemClockIds>> {
    store: ProductStore<S>,
    ids: I,
    products: Vec<Product>,
}

impl<S: KeyValueStore> ProductListController<S> {
    pub async fn open(backend: S) -> Result<Self, ControllerError> {
        let store = ProductStore::new(backend);
        let products = store.load().await?;

        let mut ids = MonotonicIds::new(SystemClockIds);
        if let Some(max) = products.iter().map(|p| p.id).max() {
            ids.observe(max);
        }

        info!(count = products.len(), "opened product list");
        Ok(Self {
            store,
            ids,
            products,
        })
    }
}

impl<S: KeyValueStore, I: IdSource> ProductListController<S, I> {
    pub async fn with_id_source(backend: S, ids: I) -> Result<Self, ControllerError> {
        let store = ProductStore::new(backend);
        let products = store.load().await?;
        Ok(Self {
            store,
            ids,
            products,
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn store(&self) -> &ProductStore<S> {
        &self.store
    }

    pub async fn add_product(&mut self, draft: ProductDraft) -> Result<Product, ControllerError> {
        draft.validate()?;

        let id = self.ids.next_id().ok_or(ControllerError::IdsExhausted)?;
        let product = Product::from_draft(id, draft);
        let mut next = self.products.clone();
        next.push(product.clone());
        self.commit(next).await?;

        info!(id = %product.id, name = %product.name, "added product");
        Ok(product)
    }

    pub async fn toggle_purchased(&mut self, id: ProductId) -> Result<bool, ControllerError> {
        let mut matched = false;
        let next: Vec<Product> = self
            .products
            .iter()
            .map(|p| {
                if p.id == id {
                    matched = true;
                    p.toggled()
                } else {
                    p.clone()
                }
            })
            .collect();
        self.commit(next).await?;

        debug!(%id, matched, "toggled purchased flag");
        Ok(matched)
    }

    pub async fn remove_product(&mut self, id: ProductId) -> Result<bool, ControllerError> {
        let next: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.id != id)
            .cloned()
            .collect();
        let matched = next.len() != self.products.len();
        self.commit(next).await?;

        if matched {
            info!(%id, "removed product");
        }
        Ok(matched)
    }

    /// Deletes every product not of `level` from the store, not just from view.
    /// [`Self::view_by_priority`] is the read-only counterpart.
    pub async fn filter_by_priority(&mut self, level: Priority) -> Result<usize, ControllerError> {
        let next: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.prioridade == level)
            .cloned()
            .collect();
        let discarded = self.products.len() - next.len();
        self.commit(next).await?;

        if discarded > 0 {
            warn!(%level, discarded, "priority filter discarded products");
        }
        Ok(discarded)
    }

    pub fn view_by_priority(&self, level: Priority) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.prioridade == level)
            .collect()
    }

    pub fn compute_progress(&self) -> Progress {
        Progress::of(&self.products)
    }

    async fn commit(&mut self, next: Vec<Product>) -> Result<(), ControllerError> {
        self.store.save(&next).await?;
        self.products = next;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
