//! Catalog domain model.
//!
//! # Responsibility
//! - Define the canonical `Product` record shared by store, service and callers.
//!
//! # Invariants
//! - Every product is identified by a non-empty, immutable `id`.
//! - Categories are free-form strings; there is no fixed category enum.

pub mod product;
