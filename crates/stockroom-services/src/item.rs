//! Inventory item types shared by the store, the stats engine and the HTTP layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed category tag on an item.
///
/// Declaration order is the order categories are reported in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    Home,
    Sports,
    #[default]
    Other,
}

impl Category {
    /// Wire/storage code, e.g. `"ELECTRONICS"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "ELECTRONICS",
            Category::Clothing => "CLOTHING",
            Category::Books => "BOOKS",
            Category::Home => "HOME",
            Category::Sports => "SPORTS",
            Category::Other => "OTHER",
        }
    }

    /// Human-readable label for HTML views.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::Home => "Home & Garden",
            Category::Sports => "Sports",
            Category::Other => "Other",
        }
    }

    /// Get all category variants
    pub fn all() -> &'static [Category] {
        &[
            Category::Electronics,
            Category::Clothing,
            Category::Books,
            Category::Home,
            Category::Sports,
            Category::Other,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a category code is not one of the fixed variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a valid category")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A stored inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    pub price: Decimal,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (${})", self.name, self.price)
    }
}

fn default_quantity() -> i64 {
    1
}

/// Fields accepted when creating (or fully replacing) an item.
///
/// Timestamps and the id are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Category,
    pub price: Decimal,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

impl NewItem {
    pub fn new(name: impl Into<String>, category: Category, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: None,
            category,
            price,
            quantity: default_quantity(),
        }
    }
}

/// Partial update; only `Some` fields are applied.
///
/// A blank `description` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

impl From<NewItem> for ItemUpdate {
    fn from(item: NewItem) -> Self {
        Self {
            name: Some(item.name),
            description: Some(item.description.unwrap_or_default()),
            category: Some(item.category),
            price: Some(item.price),
            quantity: Some(item.quantity),
        }
    }
}
