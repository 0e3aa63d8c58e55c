//! Product record store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed get-all/put/delete/clear over the `products` table.
//! - Open the backing connection lazily and keep it for the store lifetime.
//!
//! # Invariants
//! - `put` is an insert-or-overwrite keyed by `id`; row order is preserved
//!   for overwritten records.
//! - Multi-record writes (`put_all`, `replace_all`) are applied in one
//!   transaction: either every record lands or none does.
//! - `delete_key` on an absent id is not an error.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::product::{Product, ProductValidationError};
use once_cell::unsync::OnceCell;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const PRODUCT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    image_url,
    external_url,
    category,
    price
FROM products";

const PRODUCT_UPSERT_SQL: &str = "INSERT INTO products (
    id,
    title,
    description,
    image_url,
    external_url,
    category,
    price
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
ON CONFLICT(id) DO UPDATE SET
    title = excluded.title,
    description = excluded.description,
    image_url = excluded.image_url,
    external_url = excluded.external_url,
    category = excluded.category,
    price = excluded.price;";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for product store operations.
#[derive(Debug)]
pub enum StoreError {
    /// The store could not be opened or bootstrapped.
    Unavailable(DbError),
    /// A read/write/delete failed after the store was opened.
    Storage(DbError),
    /// A record was rejected before being written.
    Validation(ProductValidationError),
    /// A persisted row does not form a valid product.
    InvalidData(String),
}

impl StoreError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "store_unavailable",
            Self::Storage(_) => "store_io_failed",
            Self::Validation(_) => "validation_failed",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(err) => write!(f, "product store unavailable: {err}"),
            Self::Storage(err) => write!(f, "product store operation failed: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted product data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(err) | Self::Storage(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ProductValidationError> for StoreError {
    fn from(value: ProductValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Engine(value))
    }
}

/// Where a store keeps its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Durable SQLite file; created on first open.
    File(PathBuf),
    /// Private in-memory database, discarded with the store.
    Memory,
}

/// Keyed record store for catalog products.
pub trait ProductStore {
    /// Opens the underlying storage, creating the keyspace if absent.
    fn open(&self) -> StoreResult<()>;
    /// Returns every stored product.
    fn get_all(&self) -> StoreResult<Vec<Product>>;
    /// Inserts or overwrites one product by id.
    fn put(&self, product: &Product) -> StoreResult<()>;
    /// Inserts or overwrites several products atomically.
    fn put_all(&self, products: &[Product]) -> StoreResult<()>;
    /// Removes one product; absent ids are ignored.
    fn delete_key(&self, id: &str) -> StoreResult<()>;
    /// Removes every product.
    fn clear(&self) -> StoreResult<()>;
    /// Replaces the whole keyspace with `products` atomically.
    fn replace_all(&self, products: &[Product]) -> StoreResult<()>;
}

/// SQLite-backed product store.
pub struct SqliteProductStore {
    location: StoreLocation,
    conn: OnceCell<Connection>,
}

impl SqliteProductStore {
    /// Creates a store for `location` without touching storage yet.
    pub fn new(location: StoreLocation) -> Self {
        Self {
            location,
            conn: OnceCell::new(),
        }
    }

    /// Wraps an already bootstrapped connection.
    pub fn from_connection(location: StoreLocation, conn: Connection) -> Self {
        Self {
            location,
            conn: OnceCell::with_value(conn),
        }
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    fn connection(&self) -> StoreResult<&Connection> {
        self.conn.get_or_try_init(|| {
            let opened = match &self.location {
                StoreLocation::File(path) => open_db(path),
                StoreLocation::Memory => open_db_in_memory(),
            };
            opened.map_err(StoreError::Unavailable)
        })
    }

    fn write_all(&self, products: &[Product], clear_first: bool) -> StoreResult<()> {
        for product in products {
            product.validate()?;
        }

        let conn = self.connection()?;
        let tx = conn.unchecked_transaction()?;
        if clear_first {
            tx.execute("DELETE FROM products;", [])?;
        }
        for product in products {
            upsert_product(&tx, product)?;
        }
        tx.commit()?;
        Ok(())
    }
}

impl ProductStore for SqliteProductStore {
    fn open(&self) -> StoreResult<()> {
        self.connection().map(|_| ())
    }

    fn get_all(&self) -> StoreResult<Vec<Product>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!("{PRODUCT_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut products = Vec::new();

        while let Some(row) = rows.next()? {
            products.push(parse_product_row(row)?);
        }

        Ok(products)
    }

    fn put(&self, product: &Product) -> StoreResult<()> {
        product.validate()?;
        upsert_product(self.connection()?, product)?;
        Ok(())
    }

    fn put_all(&self, products: &[Product]) -> StoreResult<()> {
        self.write_all(products, false)
    }

    fn delete_key(&self, id: &str) -> StoreResult<()> {
        self.connection()?
            .execute("DELETE FROM products WHERE id = ?1;", [id])?;
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.connection()?.execute("DELETE FROM products;", [])?;
        Ok(())
    }

    fn replace_all(&self, products: &[Product]) -> StoreResult<()> {
        self.write_all(products, true)
    }
}

fn upsert_product(conn: &Connection, product: &Product) -> rusqlite::Result<usize> {
    let mut stmt = conn.prepare_cached(PRODUCT_UPSERT_SQL)?;
    stmt.execute(params![
        product.id.as_str(),
        product.title.as_str(),
        product.description.as_str(),
        product.image_url.as_str(),
        product.external_url.as_str(),
        product.category.as_str(),
        product.price,
    ])
}

fn parse_product_row(row: &Row<'_>) -> StoreResult<Product> {
    let product = Product {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        image_url: row.get("image_url")?,
        external_url: row.get("external_url")?,
        category: row.get("category")?,
        price: row.get("price")?,
    };
    product.validate().map_err(|err| {
        StoreError::InvalidData(format!("products row `{}`: {err}", product.id))
    })?;
    Ok(product)
}
