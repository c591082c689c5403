//! Request handlers. Each one is a thin adapter over `ItemClient` or
//! `WeatherLookup`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use stockroom_services::{
    to_category_summary, to_dashboard_payload, CategorySummary, DashboardPayload, Item,
    ItemUpdate, NewItem, DEFAULT_WINDOW_DAYS,
};
use stockroom_weather::WeatherReport;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::views;

const DEFAULT_CITY: &str = "London";

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// `GET /items`
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    Ok(Json(state.items.list().await?))
}

/// `POST /items`
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let item = state.items.create(body(payload)?).await?;
    tracing::info!("Created item {}: {}", item.id, item);
    Ok((StatusCode::CREATED, Json(item)))
}

/// `GET /items/:id`
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Item>> {
    Ok(Json(state.items.get(id).await?))
}

/// `PUT /items/:id` replaces every writable field.
pub async fn replace_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let update = ItemUpdate::from(body(payload)?);
    Ok(Json(state.items.update(id, update).await?))
}

/// `PATCH /items/:id` applies only the supplied fields.
pub async fn patch_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ItemUpdate>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    Ok(Json(state.items.update(id, body(payload)?).await?))
}

/// `DELETE /items/:id`
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.items.delete(id).await?;
    tracing::info!("Deleted item {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /items/categories`
pub async fn categories(State(state): State<AppState>) -> ApiResult<Json<Vec<CategorySummary>>> {
    let stats = state.items.category_breakdown().await?;
    Ok(Json(to_category_summary(&stats)))
}

/// `GET /items/recent_items`
pub async fn recent_items(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    let items = state
        .items
        .recent_items(DEFAULT_WINDOW_DAYS, Utc::now())
        .await?;
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    city: Option<String>,
}

/// `GET /weather?city=`
pub async fn weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> ApiResult<Json<WeatherReport>> {
    // Blank means absent; anything else is passed through untouched.
    let city = query
        .city
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(DEFAULT_CITY);

    let report = state
        .weather
        .fetch(city, state.weather_api_key.as_deref())
        .await
        .inspect_err(|e| {
            if e.is_transport() {
                tracing::warn!("Weather upstream failed for {:?}: {}", city, e);
            }
        })?;
    Ok(Json(report))
}

async fn dashboard_payload(state: &AppState) -> ApiResult<DashboardPayload> {
    let (categories, daily, totals) = state
        .items
        .dashboard_stats(DEFAULT_WINDOW_DAYS, Utc::now())
        .await?;
    Ok(to_dashboard_payload(&categories, &daily, &totals))
}

/// `GET /dashboard/data`
pub async fn dashboard_data(State(state): State<AppState>) -> ApiResult<Json<DashboardPayload>> {
    Ok(Json(dashboard_payload(&state).await?))
}

/// `GET /dashboard`
pub async fn dashboard(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let payload = dashboard_payload(&state).await?;
    Ok(Html(views::render_dashboard(&state.templates, &payload)?))
}

/// `GET /browse`
pub async fn browse(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let items = state.items.list().await?;
    Ok(Html(views::render_items_list(&state.templates, &items)?))
}
