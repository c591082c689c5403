//! SQLite-based item storage implementation.
//!
//! This module provides `SqliteItemStore`, the durable implementation of the
//! `ItemBackend` trait. Prices are stored as decimal text and timestamps as
//! fixed-width RFC 3339 UTC strings, so lexical order matches time order.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::item::{Category, Item, ItemUpdate, NewItem};
use crate::item_backend::{
    normalize_description, normalize_price, validate_new_item, validate_update, ItemBackend,
    ItemBackendError, ItemBackendResult,
};

const ITEM_COLUMNS: &str =
    "id, name, description, category, price, quantity, created_at, updated_at";

/// SQLite-based item storage.
pub struct SqliteItemStore {
    conn: Connection,
}

impl SqliteItemStore {
    /// Open (or create) an item store at the given path.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open<P: AsRef<Path>>(path: P) -> ItemBackendResult<Self> {
        let conn = Connection::open(path).map_err(ItemBackendError::storage)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory item store.
    pub fn in_memory() -> ItemBackendResult<Self> {
        let conn = Connection::open_in_memory().map_err(ItemBackendError::storage)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> ItemBackendResult<()> {
        self.conn
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS items (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    description TEXT,
                    category TEXT NOT NULL DEFAULT 'OTHER',
                    price TEXT NOT NULL,
                    quantity INTEGER NOT NULL DEFAULT 1,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_items_created_at ON items(created_at DESC);
                CREATE INDEX IF NOT EXISTS idx_items_category ON items(category);
                "#,
            )
            .map_err(ItemBackendError::storage)
    }

    /// Insert an item with an explicit creation time.
    ///
    /// Used for imports and for building fixtures at known points in time.
    pub fn insert_at(&self, item: NewItem, created_at: DateTime<Utc>) -> ItemBackendResult<Item> {
        validate_new_item(&item)?;

        let description = normalize_description(item.description);
        let price = normalize_price(item.price);
        let stamp = encode_timestamp(created_at);

        self.conn
            .execute(
                r#"
                INSERT INTO items (name, description, category, price, quantity, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
                "#,
                params![
                    item.name,
                    description,
                    item.category.as_str(),
                    price.to_string(),
                    item.quantity,
                    stamp,
                ],
            )
            .map_err(ItemBackendError::storage)?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!("Created item with ID: {}", id);

        // Round-trip through the stored encoding so callers see what a later read returns.
        let created_at = decode_timestamp(&stamp).unwrap_or(created_at);
        Ok(Item {
            id,
            name: item.name,
            description,
            category: item.category,
            price,
            quantity: item.quantity,
            created_at,
            updated_at: created_at,
        })
    }

    fn query_items(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> ItemBackendResult<Vec<Item>> {
        let mut stmt = self.conn.prepare(sql).map_err(ItemBackendError::storage)?;
        let rows = stmt
            .query_map(params, Self::row_to_item)
            .map_err(ItemBackendError::storage)?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(ItemBackendError::storage)
    }

    /// Convert a database row to an Item.
    fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<Item> {
        let category_str: String = row.get(3)?;
        let price_str: String = row.get(4)?;
        let created_at_str: String = row.get(6)?;
        let updated_at_str: String = row.get(7)?;

        let category = Category::from_str(&category_str)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
        let price = Decimal::from_str(&price_str)
            .map(normalize_price)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
        let created_at = decode_timestamp(&created_at_str)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;
        let updated_at = decode_timestamp(&updated_at_str)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?;

        Ok(Item {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            category,
            price,
            quantity: row.get(5)?,
            created_at,
            updated_at,
        })
    }
}

fn encode_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

impl ItemBackend for SqliteItemStore {
    fn list(&self) -> ItemBackendResult<Vec<Item>> {
        self.query_items(
            &format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY created_at DESC, id DESC"),
            [],
        )
    }

    fn get(&self, id: i64) -> ItemBackendResult<Option<Item>> {
        let mut items = self.query_items(
            &format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"),
            params![id],
        )?;
        Ok(items.pop())
    }

    fn create(&self, item: NewItem) -> ItemBackendResult<Item> {
        self.insert_at(item, Utc::now())
    }

    fn update(&self, id: i64, update: ItemUpdate) -> ItemBackendResult<Item> {
        validate_update(&update)?;

        let mut item = self.get(id)?.ok_or(ItemBackendError::NotFound(id))?;

        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(description) = update.description {
            item.description = normalize_description(Some(description));
        }
        if let Some(category) = update.category {
            item.category = category;
        }
        if let Some(price) = update.price {
            item.price = normalize_price(price);
        }
        if let Some(quantity) = update.quantity {
            item.quantity = quantity;
        }

        let stamp = encode_timestamp(Utc::now());
        item.updated_at = decode_timestamp(&stamp).unwrap_or_else(|_| Utc::now());

        self.conn
            .execute(
                r#"
                UPDATE items
                SET name = ?1, description = ?2, category = ?3, price = ?4, quantity = ?5, updated_at = ?6
                WHERE id = ?7
                "#,
                params![
                    item.name,
                    item.description,
                    item.category.as_str(),
                    item.price.to_string(),
                    item.quantity,
                    stamp,
                    id,
                ],
            )
            .map_err(ItemBackendError::storage)?;

        tracing::debug!("Updated item: {}", id);
        Ok(item)
    }

    fn delete(&self, id: i64) -> ItemBackendResult<()> {
        let affected = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1", params![id])
            .map_err(ItemBackendError::storage)?;

        if affected == 0 {
            return Err(ItemBackendError::NotFound(id));
        }

        tracing::debug!("Deleted item: {}", id);
        Ok(())
    }

    fn created_since(&self, cutoff: DateTime<Utc>) -> ItemBackendResult<Vec<Item>> {
        self.query_items(
            &format!(
                "SELECT {ITEM_COLUMNS} FROM items WHERE created_at >= ?1 ORDER BY created_at DESC, id DESC"
            ),
            params![encode_timestamp(cutoff)],
        )
    }

    fn count(&self) -> ItemBackendResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
            .map_err(ItemBackendError::storage)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;
    use stockroom_core::DatabaseError;

    fn create_test_store() -> SqliteItemStore {
        SqliteItemStore::in_memory().expect("Failed to create in-memory store")
    }

    #[test]
    fn test_create_and_get_item() {
        let store = create_test_store();

        let item = store
            .create(NewItem::new("Headphones", Category::Electronics, dec!(59.90)))
            .unwrap();
        assert!(item.id > 0);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.created_at, item.updated_at);

        let retrieved = store.get(item.id).unwrap().unwrap();
        assert_eq!(retrieved, item);
        assert_eq!(retrieved.price.to_string(), "59.90");
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = create_test_store();
        assert!(store.get(42).unwrap().is_none());
    }

    #[test]
    fn test_create_rejects_invalid_item() {
        let store = create_test_store();
        let result = store.create(NewItem::new("  ", Category::Books, dec!(1)));
        assert!(matches!(result, Err(ItemBackendError::Validation(_))));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_list_newest_first() {
        let store = create_test_store();
        let now = Utc::now();

        store
            .insert_at(NewItem::new("Old", Category::Books, dec!(1)), now - Duration::days(2))
            .unwrap();
        store
            .insert_at(NewItem::new("New", Category::Books, dec!(1)), now)
            .unwrap();
        store
            .insert_at(NewItem::new("Mid", Category::Books, dec!(1)), now - Duration::days(1))
            .unwrap();

        let names: Vec<String> = store.list().unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn test_update_applies_fields_and_refreshes_updated_at() {
        let store = create_test_store();
        let created_at = Utc::now() - Duration::hours(1);
        let item = store
            .insert_at(NewItem::new("Shirt", Category::Clothing, dec!(15)), created_at)
            .unwrap();

        let update = ItemUpdate {
            price: Some(dec!(12.50)),
            quantity: Some(-2),
            ..Default::default()
        };
        let updated = store.update(item.id, update).unwrap();

        assert_eq!(updated.name, "Shirt");
        assert_eq!(updated.price, dec!(12.50));
        assert_eq!(updated.quantity, -2);
        assert_eq!(updated.created_at, item.created_at);
        assert!(updated.updated_at > item.updated_at);

        let reread = store.get(item.id).unwrap().unwrap();
        assert_eq!(reread, updated);
    }

    #[test]
    fn test_update_blank_description_clears_it() {
        let store = create_test_store();
        let mut new_item = NewItem::new("Mug", Category::Home, dec!(4));
        new_item.description = Some("ceramic".to_string());
        let item = store.create(new_item).unwrap();
        assert_eq!(item.description.as_deref(), Some("ceramic"));

        let update = ItemUpdate {
            description: Some(String::new()),
            ..Default::default()
        };
        let updated = store.update(item.id, update).unwrap();
        assert_eq!(updated.description, None);
    }

    #[test]
    fn test_update_missing_item() {
        let store = create_test_store();
        let result = store.update(7, ItemUpdate::default());
        assert!(matches!(result, Err(ItemBackendError::NotFound(7))));
    }

    #[test]
    fn test_delete_item() {
        let store = create_test_store();
        let item = store.create(NewItem::new("Ball", Category::Sports, dec!(8))).unwrap();

        store.delete(item.id).unwrap();
        assert!(store.get(item.id).unwrap().is_none());
        assert!(matches!(store.delete(item.id), Err(ItemBackendError::NotFound(_))));
    }

    #[test]
    fn test_created_since_is_inclusive() {
        let store = create_test_store();
        let now = Utc::now();
        let cutoff = now - Duration::days(7);

        store.insert_at(NewItem::new("Edge", Category::Other, dec!(1)), cutoff).unwrap();
        store
            .insert_at(
                NewItem::new("Before", Category::Other, dec!(1)),
                cutoff - Duration::seconds(1),
            )
            .unwrap();
        store
            .insert_at(NewItem::new("Future", Category::Other, dec!(1)), now + Duration::days(3))
            .unwrap();

        let names: Vec<String> = store
            .created_since(cutoff)
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Future", "Edge"]);
    }

    #[test]
    fn test_prices_stored_with_two_decimal_places() {
        let store = create_test_store();

        let whole = store.create(NewItem::new("Ball", Category::Sports, dec!(7))).unwrap();
        let padded = store
            .create(NewItem::new("Bat", Category::Sports, dec!(9.9900)))
            .unwrap();
        assert_eq!(whole.price.to_string(), "7.00");
        assert_eq!(padded.price.to_string(), "9.99");
        assert_eq!(whole.to_string(), "Ball ($7.00)");

        let stored: String = store
            .conn
            .query_row("SELECT price FROM items WHERE id = ?1", params![whole.id], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(stored, "7.00");

        let update = ItemUpdate {
            price: Some(dec!(3.5)),
            ..Default::default()
        };
        store.update(padded.id, update).unwrap();
        let reread = store.get(padded.id).unwrap().unwrap();
        assert_eq!(reread.price.to_string(), "3.50");
    }

    #[test]
    fn test_legacy_price_text_read_at_fixed_scale() {
        let store = create_test_store();
        store
            .conn
            .execute(
                "INSERT INTO items (name, category, price, quantity, created_at, updated_at)
                 VALUES ('Old', 'BOOKS', '4', 1, '2026-01-01T00:00:00.000000Z', '2026-01-01T00:00:00.000000Z')",
                [],
            )
            .unwrap();

        let items = store.list().unwrap();
        assert_eq!(items[0].price.to_string(), "4.00");
    }

    #[test]
    fn test_count() {
        let store = create_test_store();
        assert_eq!(store.count().unwrap(), 0);
        store.create(NewItem::new("A", Category::Other, dec!(1))).unwrap();
        store.create(NewItem::new("B", Category::Other, dec!(1))).unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_unknown_stored_category_is_storage_error() {
        let store = create_test_store();
        store
            .conn
            .execute(
                "INSERT INTO items (name, category, price, quantity, created_at, updated_at)
                 VALUES ('Odd', 'TOYS', '1.00', 1, '2026-01-01T00:00:00.000000Z', '2026-01-01T00:00:00.000000Z')",
                [],
            )
            .unwrap();

        let result = store.list();
        assert!(matches!(
            result,
            Err(ItemBackendError::Storage(DatabaseError::Corruption(_)))
        ));
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.db");

        {
            let store = SqliteItemStore::open(&path).unwrap();
            store.create(NewItem::new("Persisted", Category::Books, dec!(3.25))).unwrap();
        }

        let store = SqliteItemStore::open(&path).unwrap();
        let items = store.list().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Persisted");
    }

    #[test]
    fn test_open_in_missing_directory_is_connection_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("items.db");

        let err = match SqliteItemStore::open(&path) {
            Ok(_) => panic!("opening under a missing directory should fail"),
            Err(e) => e,
        };
        assert!(matches!(
            err,
            ItemBackendError::Storage(DatabaseError::ConnectionFailed(_))
        ));

        let app_err = stockroom_core::AppError::from(err);
        assert_eq!(
            app_err.user_message(),
            "Unable to open the item database. Check the database path."
        );
    }
}
