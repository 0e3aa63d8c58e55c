//! Product domain model.
//!
//! # Responsibility
//! - Define the catalog record and its field-level validation rules.
//! - Provide id generation for newly created products.
//!
//! # Invariants
//! - `id` is non-empty and never changes after creation.
//! - `image_url` and `external_url` parse as absolute URLs.
//! - `price` is finite and non-negative.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

/// Stable product identifier.
///
/// Kept as a type alias: ids are opaque strings assigned by the caller.
pub type ProductId = String;

pub const TITLE_MIN_CHARS: usize = 3;
pub const DESCRIPTION_MIN_CHARS: usize = 10;

static LAST_GENERATED_ID: AtomicU64 = AtomicU64::new(0);

/// Field-level validation failure for a product record.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductValidationError {
    EmptyId,
    TitleTooShort { min: usize, actual: usize },
    DescriptionTooShort { min: usize, actual: usize },
    InvalidUrl { field: &'static str, value: String },
    EmptyCategory,
    InvalidPrice(f64),
}

impl Display for ProductValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "id must not be empty"),
            Self::TitleTooShort { min, actual } => {
                write!(f, "title must be at least {min} characters (got {actual})")
            }
            Self::DescriptionTooShort { min, actual } => write!(
                f,
                "description must be at least {min} characters (got {actual})"
            ),
            Self::InvalidUrl { field, value } => {
                write!(f, "{field} must be a valid URL (got `{value}`)")
            }
            Self::EmptyCategory => write!(f, "category must not be empty"),
            Self::InvalidPrice(price) => {
                write!(f, "price must be a non-negative number (got {price})")
            }
        }
    }
}

impl Error for ProductValidationError {}

/// Catalog entry shown to end users and edited through the admin view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ProductWire")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    /// Product picture location.
    pub image_url: String,
    /// Link to the external marketplace listing.
    pub external_url: String,
    pub category: String,
    pub price: f64,
}

impl Product {
    /// Checks every field invariant, reporting the first violation.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.id.trim().is_empty() {
            return Err(ProductValidationError::EmptyId);
        }

        let title_len = self.title.chars().count();
        if title_len < TITLE_MIN_CHARS {
            return Err(ProductValidationError::TitleTooShort {
                min: TITLE_MIN_CHARS,
                actual: title_len,
            });
        }

        let description_len = self.description.chars().count();
        if description_len < DESCRIPTION_MIN_CHARS {
            return Err(ProductValidationError::DescriptionTooShort {
                min: DESCRIPTION_MIN_CHARS,
                actual: description_len,
            });
        }

        validate_url("imageUrl", &self.image_url)?;
        validate_url("externalUrl", &self.external_url)?;

        if self.category.trim().is_empty() {
            return Err(ProductValidationError::EmptyCategory);
        }

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ProductValidationError::InvalidPrice(self.price));
        }

        Ok(())
    }
}

/// Product fields supplied by a creation form, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub external_url: String,
    pub category: String,
    pub price: f64,
}

impl ProductDraft {
    /// Attaches `id` and validates the resulting record.
    pub fn into_product(
        self,
        id: impl Into<ProductId>,
    ) -> Result<Product, ProductValidationError> {
        let product = Product {
            id: id.into(),
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            external_url: self.external_url,
            category: self.category,
            price: self.price,
        };
        product.validate()?;
        Ok(product)
    }
}

/// Generates a timestamp-derived product id (epoch milliseconds).
///
/// Ids generated within one process are strictly increasing, even when two
/// calls land in the same millisecond.
pub fn generate_product_id() -> ProductId {
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64);

    let mut previous = LAST_GENERATED_ID.load(Ordering::Relaxed);
    loop {
        let next = now_ms.max(previous + 1);
        match LAST_GENERATED_ID.compare_exchange_weak(
            previous,
            next,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return next.to_string(),
            Err(current) => previous = current,
        }
    }
}

fn validate_url(field: &'static str, value: &str) -> Result<(), ProductValidationError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|_| ProductValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductWire {
    id: ProductId,
    title: String,
    description: String,
    image_url: String,
    external_url: String,
    category: String,
    price: f64,
}

impl TryFrom<ProductWire> for Product {
    type Error = ProductValidationError;

    fn try_from(value: ProductWire) -> Result<Self, Self::Error> {
        let product = Product {
            id: value.id,
            title: value.title,
            description: value.description,
            image_url: value.image_url,
            external_url: value.external_url,
            category: value.category,
            price: value.price,
        };
        product.validate()?;
        Ok(product)
    }
}
