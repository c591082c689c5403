//! Reshapes stats into the flat structures the API and charts consume.
//!
//! Pure transformations; no I/O.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::item::Category;
use crate::stats::{CategoryStat, DailyCount, Totals};

/// One row of the category-summary endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub count: u64,
    pub total_value: Decimal,
}

/// Parallel arrays for the chart dashboard.
///
/// `categories`, `category_counts` and `category_values` are index-aligned, as
/// are `dates` and `daily_counts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardPayload {
    pub categories: Vec<String>,
    pub category_counts: Vec<u64>,
    pub category_values: Vec<f64>,
    pub dates: Vec<String>,
    pub daily_counts: Vec<u64>,
    pub total_items: u64,
    pub total_value: f64,
    pub avg_price: f64,
}

pub fn to_category_summary(stats: &[CategoryStat]) -> Vec<CategorySummary> {
    stats
        .iter()
        .map(|s| CategorySummary {
            category: s.category,
            count: s.count,
            total_value: s.total_value,
        })
        .collect()
}

pub fn to_dashboard_payload(
    category_stats: &[CategoryStat],
    daily_counts: &[DailyCount],
    totals: &Totals,
) -> DashboardPayload {
    let mut payload = DashboardPayload {
        total_items: totals.item_count,
        total_value: to_f64(totals.total_value),
        avg_price: to_f64(totals.average_price),
        ..Default::default()
    };

    for stat in category_stats {
        payload.categories.push(stat.category.as_str().to_string());
        payload.category_counts.push(stat.count);
        payload.category_values.push(to_f64(stat.total_value));
    }

    for day in daily_counts {
        payload.dates.push(day.date.format("%Y-%m-%d").to_string());
        payload.daily_counts.push(day.count);
    }

    payload
}

// Display only; precision loss is acceptable.
fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
