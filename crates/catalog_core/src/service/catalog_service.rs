//! Catalog use-case service.
//!
//! # Responsibility
//! - Load the catalog, seeding an empty store on first run.
//! - Apply add/update/remove through the store, then mirror them in the cache.
//! - Serve categories and filtered views from the cache.
//!
//! # Invariants
//! - The cache changes only after the matching store write succeeded.
//! - Callers only ever receive owned snapshots of cached products.
//! - `load_all` never fails: storage problems degrade to the seed catalog.

use crate::db::DbError;
use crate::model::product::{Product, ProductId, ProductValidationError};
use crate::repo::product_store::{ProductStore, StoreError, StoreResult};
use crate::seed::default_products;
use crate::service::category_filter::{derive_categories, filter_products, CategoryFilter};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error surfaced by catalog mutations.
#[derive(Debug)]
pub enum CatalogError {
    /// The store could not be opened.
    StorageUnavailable(DbError),
    /// A store operation failed after opening.
    Storage(StoreError),
    /// `add` targeted an id that already exists.
    DuplicateId(ProductId),
    /// `update` targeted an id that does not exist.
    NotFound(ProductId),
    /// The record violates a field invariant.
    InvalidProduct(ProductValidationError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(err) => write!(f, "catalog storage unavailable: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "product id already exists: {id}"),
            Self::NotFound(id) => write!(f, "product not found: {id}"),
            Self::InvalidProduct(err) => write!(f, "invalid product: {err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::InvalidProduct(err) => Some(err),
            Self::DuplicateId(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable(err) => Self::StorageUnavailable(err),
            StoreError::Validation(err) => Self::InvalidProduct(err),
            other => Self::Storage(other),
        }
    }
}

impl From<ProductValidationError> for CatalogError {
    fn from(value: ProductValidationError) -> Self {
        Self::InvalidProduct(value)
    }
}

/// Whether the cache mirrors durable state yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    Uninitialized,
    Loaded,
}

/// Catalog facade owning the record store and the in-memory product cache.
pub struct CatalogService<S: ProductStore> {
    store: S,
    cache: Vec<Product>,
    state: CatalogState,
}

impl<S: ProductStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: Vec::new(),
            state: CatalogState::Uninitialized,
        }
    }

    pub fn state(&self) -> CatalogState {
        self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads every product, writing the seed catalog into an empty store.
    ///
    /// On any storage failure the seed catalog is returned instead and the
    /// service stays `Uninitialized`, so the next `add`/`update` re-reads the store.
    pub fn load_all(&mut self) -> Vec<Product> {
        let started_at = Instant::now();
        match self.read_or_seed() {
            Ok((products, seeded)) => {
                info!(
                    "event=catalog_load module=service status=ok count={} seeded={} duration_ms={}",
                    products.len(),
                    seeded,
                    started_at.elapsed().as_millis()
                );
                self.cache = products;
                self.state = CatalogState::Loaded;
            }
            Err(err) => {
                warn!(
                    "event=catalog_load module=service status=degraded duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                self.cache = default_products();
            }
        }
        self.cache.clone()
    }

    /// Adds a new product.
    ///
    /// # Errors
    /// - `InvalidProduct` when a field invariant fails.
    /// - `DuplicateId` when the id is already present.
    /// - `StorageUnavailable`/`Storage` when the write fails; the cache is untouched.
    pub fn add(&mut self, product: Product) -> CatalogResult<()> {
        product.validate()?;
        self.ensure_loaded()?;

        if self.position(&product.id).is_some() {
            warn!(
                "event=product_add module=service status=rejected error_code=duplicate_id product_id={}",
                product.id
            );
            return Err(CatalogError::DuplicateId(product.id));
        }

        self.store.put(&product)?;
        info!(
            "event=product_add module=service status=ok product_id={}",
            product.id
        );
        self.cache.push(product);
        Ok(())
    }

    /// Replaces an existing product, keyed by `product.id`.
    ///
    /// # Errors
    /// - `InvalidProduct` when a field invariant fails.
    /// - `NotFound` when the id is absent.
    /// - `StorageUnavailable`/`Storage` when the write fails; the cache is untouched.
    pub fn update(&mut self, product: Product) -> CatalogResult<()> {
        product.validate()?;
        self.ensure_loaded()?;

        let Some(index) = self.position(&product.id) else {
            warn!(
                "event=product_update module=service status=rejected error_code=not_found product_id={}",
                product.id
            );
            return Err(CatalogError::NotFound(product.id));
        };

        self.store.put(&product)?;
        info!(
            "event=product_update module=service status=ok product_id={}",
            product.id
        );
        self.cache[index] = product;
        Ok(())
    }

    /// Removes a product by id. Removing an absent id is a no-op.
    ///
    /// Does not read the store first, so a row that no longer parses can
    /// still be deleted.
    pub fn remove(&mut self, id: &str) -> CatalogResult<()> {
        self.store.delete_key(id)?;

        let before = self.cache.len();
        self.cache.retain(|product| product.id != id);
        info!(
            "event=product_remove module=service status=ok product_id={} removed={}",
            id,
            before - self.cache.len()
        );
        Ok(())
    }

    /// Overwrites the whole store with the seed catalog.
    pub fn reset_to_defaults(&mut self) -> CatalogResult<Vec<Product>> {
        let seed = default_products();
        self.store.open()?;
        self.store.replace_all(&seed)?;
        info!(
            "event=catalog_reset module=service status=ok count={}",
            seed.len()
        );
        self.cache = seed;
        self.state = CatalogState::Loaded;
        Ok(self.cache.clone())
    }

    /// Distinct categories of the cached products, in first-seen order.
    pub fn list_categories(&self) -> Vec<String> {
        derive_categories(&self.cache)
    }

    /// Cached products visible under the selection `token` (`all` selects every product).
    pub fn filter_by_category(&self, token: &str) -> Vec<Product> {
        filter_products(&self.cache, &CategoryFilter::from_token(token))
    }

    /// Snapshot of the cached products.
    pub fn products(&self) -> Vec<Product> {
        self.cache.clone()
    }

    pub fn get(&self, id: &str) -> Option<Product> {
        self.position(id).map(|index| self.cache[index].clone())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.cache.iter().position(|product| product.id == id)
    }

    fn read_or_seed(&self) -> StoreResult<(Vec<Product>, bool)> {
        self.store.open()?;
        let stored = self.store.get_all()?;
        if !stored.is_empty() {
            return Ok((stored, false));
        }

        let seed = default_products();
        self.store.put_all(&seed)?;
        Ok((seed, true))
    }

    fn ensure_loaded(&mut self) -> CatalogResult<()> {
        if self.state == CatalogState::Loaded {
            return Ok(());
        }

        self.store.open()?;
        self.cache = self.store.get_all()?;
        self.state = CatalogState::Loaded;
        Ok(())
    }
}
