//! Server-rendered HTML pages.

use serde::Serialize;
use stockroom_services::{DashboardPayload, Item};
use tera::{Context, Tera};

const ITEMS_LIST_TEMPLATE: &str = "items_list.html";
const DASHBOARD_TEMPLATE: &str = "dashboard.html";

/// Compile the templates bundled into the binary.
pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (ITEMS_LIST_TEMPLATE, include_str!("../templates/items_list.html")),
        (DASHBOARD_TEMPLATE, include_str!("../templates/dashboard.html")),
    ])?;
    Ok(tera)
}

/// One table row on the browse page.
#[derive(Debug, Serialize)]
struct ItemRow<'a> {
    id: i64,
    name: &'a str,
    description: &'a str,
    category: &'static str,
    price: String,
    quantity: i64,
    created_at: String,
}

impl<'a> From<&'a Item> for ItemRow<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            id: item.id,
            name: &item.name,
            description: item.description.as_deref().unwrap_or(""),
            category: item.category.label(),
            price: format!("{:.2}", item.price),
            quantity: item.quantity,
            created_at: item.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

pub fn render_items_list(tera: &Tera, items: &[Item]) -> Result<String, tera::Error> {
    let rows: Vec<ItemRow<'_>> = items.iter().map(ItemRow::from).collect();

    let mut ctx = Context::new();
    ctx.insert("items", &rows);
    tera.render(ITEMS_LIST_TEMPLATE, &ctx)
}

pub fn render_dashboard(tera: &Tera, payload: &DashboardPayload) -> Result<String, tera::Error> {
    let mut ctx = Context::from_serialize(payload)?;
    // Chart.js reads the arrays straight from an inline script.
    let chart_data = serde_json::to_string(payload)
        .map_err(|e| tera::Error::msg(format!("Failed to encode chart data: {}", e)))?;
    ctx.insert("chart_data", &chart_data);
    tera.render(DASHBOARD_TEMPLATE, &ctx)
}
