//! Core catalog logic: product model, local record store and catalog service.
//! Presentation layers call into [`CatalogService`] and never touch storage directly.

pub mod admin;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use admin::{AdminGate, SharedSecretGate};
pub use config::{CatalogConfig, ConfigError, ConfigOverrides};
pub use logging::{default_log_level, init_logging, logging_status, normalize_level};
pub use model::product::{
    generate_product_id, Product, ProductDraft, ProductId, ProductValidationError,
};
pub use repo::product_store::{
    ProductStore, SqliteProductStore, StoreError, StoreLocation, StoreResult,
};
pub use seed::default_products;
pub use service::catalog_service::{CatalogError, CatalogResult, CatalogService, CatalogState};
pub use service::category_filter::{
    derive_categories, filter_products, CategoryFilter, ALL_CATEGORIES_TOKEN,
};

/// Minimal health-check API for wiring checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
