pub mod item;
pub mod item_backend;
pub mod item_client;
pub mod item_store;
pub mod report;
pub mod stats;

pub use item::{Category, Item, ItemUpdate, NewItem, UnknownCategory};
pub use item_backend::{ItemBackend, ItemBackendError, ItemBackendResult};
pub use item_client::ItemClient;
pub use item_store::SqliteItemStore;
pub use report::{to_category_summary, to_dashboard_payload, CategorySummary, DashboardPayload};
pub use stats::{CategoryStat, DailyCount, StatsEngine, Totals, DEFAULT_WINDOW_DAYS};
