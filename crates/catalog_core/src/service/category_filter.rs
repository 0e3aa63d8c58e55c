//! Category derivation and filtering over product snapshots.
//!
//! # Invariants
//! - Categories keep first-seen order and are never sorted.
//! - Category matching is case-sensitive and exact.

use crate::model::product::Product;
use std::collections::HashSet;

/// Filter token that selects every product.
pub const ALL_CATEGORIES_TOKEN: &str = "all";

/// Category selection applied to a product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parses a selection token; only the exact sentinel `all` means "all".
    pub fn from_token(token: &str) -> Self {
        if token == ALL_CATEGORIES_TOKEN {
            Self::All
        } else {
            Self::Category(token.to_string())
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => product.category == *category,
        }
    }
}

/// Returns distinct categories in first-seen order.
pub fn derive_categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter(|product| seen.insert(product.category.as_str()))
        .map(|product| product.category.clone())
        .collect()
}

/// Returns owned copies of the products selected by `filter`, in input order.
pub fn filter_products(products: &[Product], filter: &CategoryFilter) -> Vec<Product> {
    products
        .iter()
        .filter(|product| filter.matches(product))
        .cloned()
        .collect()
}
