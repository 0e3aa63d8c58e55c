//! Catalog use-case services.
//!
//! # Responsibility
//! - Compose the record store and seed data into catalog operations.
//! - Derive categories and filtered views for presentation callers.

pub mod catalog_service;
pub mod category_filter;
