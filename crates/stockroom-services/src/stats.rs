//! Aggregate statistics over the item store.
//!
//! All operations are plain reads; any backend failure is returned as-is with
//! no partial result.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::item::{Category, Item};
use crate::item_backend::{ItemBackend, ItemBackendResult};

/// Trailing window used by the recent-items and daily-count views.
pub const DEFAULT_WINDOW_DAYS: NonZeroU32 = match NonZeroU32::new(7) {
    Some(n) => n,
    None => unreachable!(),
};

/// Count and summed price for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: Category,
    pub count: u64,
    pub total_value: Decimal,
}

/// Number of items created on one calendar day (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Store-wide totals; never windowed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub item_count: u64,
    pub total_value: Decimal,
    pub average_price: Decimal,
}

/// Computes aggregates over a borrowed backend.
pub struct StatsEngine<'a, B: ItemBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: ItemBackend + ?Sized> StatsEngine<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Count and price sum per category, in category declaration order.
    ///
    /// Categories with no items are omitted.
    pub fn category_breakdown(&self) -> ItemBackendResult<Vec<CategoryStat>> {
        let items = self.backend.list()?;
        Ok(group_by_category(&items))
    }

    /// Items created at or after `now - window_days`.
    ///
    /// Only the lower bound is applied: items stamped after `now` are kept.
    pub fn recent_items(
        &self,
        window_days: NonZeroU32,
        now: DateTime<Utc>,
    ) -> ItemBackendResult<Vec<Item>> {
        self.backend.created_since(window_start(window_days, now))
    }

    /// Per-day creation counts over the same window as `recent_items`,
    /// ascending by date. Days with no items are omitted.
    pub fn daily_counts(
        &self,
        window_days: NonZeroU32,
        now: DateTime<Utc>,
    ) -> ItemBackendResult<Vec<DailyCount>> {
        let items = self.recent_items(window_days, now)?;
        Ok(bucket_by_day(&items))
    }

    /// Item count, summed price and mean price over the whole store.
    pub fn totals(&self) -> ItemBackendResult<Totals> {
        let items = self.backend.list()?;
        Ok(summarize(&items))
    }
}

fn window_start(window_days: NonZeroU32, now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(i64::from(window_days.get()))
}

fn group_by_category(items: &[Item]) -> Vec<CategoryStat> {
    let mut groups: BTreeMap<Category, (u64, Decimal)> = BTreeMap::new();
    for item in items {
        let entry = groups.entry(item.category).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += item.price;
    }

    groups
        .into_iter()
        .map(|(category, (count, total_value))| CategoryStat {
            category,
            count,
            total_value,
        })
        .collect()
}

fn bucket_by_day(items: &[Item]) -> Vec<DailyCount> {
    let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for item in items {
        *days.entry(item.created_at.date_naive()).or_insert(0) += 1;
    }

    days.into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

fn summarize(items: &[Item]) -> Totals {
    let item_count = items.len() as u64;
    let total_value: Decimal = items.iter().map(|i| i.price).sum();
    let average_price = if item_count > 0 {
        total_value / Decimal::from(item_count)
    } else {
        Decimal::ZERO
    };

    Totals {
        item_count,
        total_value,
        average_price,
    }
}
