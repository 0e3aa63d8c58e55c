//! Record store contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the keyed record store the catalog service composes.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Store writes enforce `Product::validate()` before persistence.
//! - Open failures and post-open failures surface as distinct errors.

pub mod product_store;
