//! Item storage backend trait and error types.
//!
//! This module defines the `ItemBackend` trait that abstracts over the durable
//! item collection, plus the validation applied at the model boundary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use stockroom_core::{AppError, DatabaseError};
use thiserror::Error;

use crate::item::{Item, ItemUpdate, NewItem};

/// Errors that can occur during item backend operations.
#[derive(Debug, Error)]
pub enum ItemBackendError {
    /// Item was not found.
    #[error("Item not found: {0}")]
    NotFound(i64),

    /// Validation error (e.g., empty name, negative price).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The store was unavailable or a query failed.
    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),

    /// Generic error wrapper.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ItemBackendError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Wrap a raw SQLite error as a storage error.
    pub fn storage(err: rusqlite::Error) -> Self {
        use stockroom_core::RusqliteErrorExt;
        Self::Storage(err.into_database_error())
    }
}

impl From<ItemBackendError> for AppError {
    fn from(err: ItemBackendError) -> Self {
        match err {
            ItemBackendError::Storage(e) => AppError::Database(e),
            ItemBackendError::Other(e) => AppError::Other(e),
            other => AppError::Other(other.into()),
        }
    }
}

/// Result type for item backend operations.
pub type ItemBackendResult<T> = Result<T, ItemBackendError>;

/// Trait for item storage backends.
///
/// Each call is atomic on its own; callers get no cross-call transaction.
///
/// Note: Implementations don't need to be Sync - the ItemClient wrapper handles
/// thread-safe access via Mutex.
pub trait ItemBackend: Send {
    /// List all items, newest first (created_at DESC).
    fn list(&self) -> ItemBackendResult<Vec<Item>>;

    /// Get an item by ID.
    ///
    /// Returns `None` if the item doesn't exist.
    fn get(&self, id: i64) -> ItemBackendResult<Option<Item>>;

    /// Insert a new item, stamping both timestamps with the current time.
    ///
    /// # Errors
    /// Returns `ItemBackendError::Validation` if the fields are invalid.
    fn create(&self, item: NewItem) -> ItemBackendResult<Item>;

    /// Apply a partial update and refresh `updated_at`.
    ///
    /// # Errors
    /// Returns `ItemBackendError::NotFound` if the item doesn't exist.
    /// Returns `ItemBackendError::Validation` if a supplied field is invalid.
    fn update(&self, id: i64, update: ItemUpdate) -> ItemBackendResult<Item>;

    /// Delete an item.
    ///
    /// # Errors
    /// Returns `ItemBackendError::NotFound` if the item doesn't exist.
    fn delete(&self, id: i64) -> ItemBackendResult<()>;

    /// Items with `created_at >= cutoff`, newest first. No upper bound.
    fn created_since(&self, cutoff: DateTime<Utc>) -> ItemBackendResult<Vec<Item>>;

    /// Total number of stored items.
    fn count(&self) -> ItemBackendResult<u64>;
}

/// Maximum item name length.
pub const MAX_NAME_LENGTH: usize = 200;

/// Fractional digits kept for prices.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Total significant digits allowed for a price.
pub const PRICE_MAX_DIGITS: u32 = 10;

/// Validate an item name.
///
/// # Errors
/// Returns `ItemBackendError::Validation` if the name is blank or longer than
/// `MAX_NAME_LENGTH` characters.
pub fn validate_name(name: &str) -> ItemBackendResult<()> {
    if name.trim().is_empty() {
        return Err(ItemBackendError::validation("Name cannot be empty"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ItemBackendError::validation(format!(
            "Name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        )));
    }

    Ok(())
}

/// Validate a price.
///
/// # Errors
/// Returns `ItemBackendError::Validation` if the price is negative, has more
/// than two fractional digits, or more than ten digits in total.
pub fn validate_price(price: Decimal) -> ItemBackendResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ItemBackendError::validation("Price cannot be negative"));
    }

    let normalized = price.normalize();
    if normalized.scale() > PRICE_DECIMAL_PLACES {
        return Err(ItemBackendError::validation(format!(
            "Price cannot have more than {} decimal places",
            PRICE_DECIMAL_PLACES
        )));
    }

    let limit = Decimal::from(10_i64.pow(PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES));
    if price >= limit {
        return Err(ItemBackendError::validation(format!(
            "Price cannot have more than {} digits in total",
            PRICE_MAX_DIGITS
        )));
    }

    Ok(())
}

/// Validate every field of a new item.
///
/// # Errors
/// Returns the first `ItemBackendError::Validation` encountered.
pub fn validate_new_item(item: &NewItem) -> ItemBackendResult<()> {
    validate_name(&item.name)?;
    validate_price(item.price)
}

/// Validate only the fields present in an update.
///
/// # Errors
/// Returns the first `ItemBackendError::Validation` encountered.
pub fn validate_update(update: &ItemUpdate) -> ItemBackendResult<()> {
    if let Some(ref name) = update.name {
        validate_name(name)?;
    }
    if let Some(price) = update.price {
        validate_price(price)?;
    }
    Ok(())
}

/// Bring a price to the stored scale of exactly `PRICE_DECIMAL_PLACES` digits.
///
/// `7` becomes `7.00` and `9.9900` becomes `9.99`. Call after `validate_price`,
/// which has already rejected anything that would lose significant digits.
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut scaled = if price.is_zero() {
        Decimal::ZERO
    } else {
        price.normalize()
    };
    scaled.rescale(PRICE_DECIMAL_PLACES);
    scaled
}

/// Blank descriptions are stored as absent.
pub(crate) fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}
