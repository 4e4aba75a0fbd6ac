//! Inventory endpoints.

use axum::extract::{Path, State};
use axum::response::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use hims_core::inventory::{InventoryItem, InventoryService, ItemCategory, NewInventoryItem};

use crate::{map_record_error, non_empty, parse_id, ApiResult, AppState};

/// Request body for adding an inventory item.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateItemReq {
    pub name: String,
    pub category: ItemCategory,
    pub quantity: u32,
    pub unit: String,
    pub reorder_level: u32,
    pub expiry_date: Option<NaiveDate>,
}

/// Request body for a signed stock adjustment.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct AdjustStockReq {
    /// Positive for receipts, negative for issues.
    pub delta: i64,
}

/// List of inventory items.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ListItemsRes {
    pub items: Vec<InventoryItem>,
}

#[utoipa::path(
    post,
    path = "/inventory",
    request_body = CreateItemReq,
    responses(
        (status = 200, description = "Item added", body = InventoryItem),
        (status = 400, description = "Bad request")
    )
)]
/// Add an inventory item
pub async fn create_item(
    State(state): State<AppState>,
    Json(req): Json<CreateItemReq>,
) -> ApiResult<InventoryItem> {
    let new = NewInventoryItem {
        name: non_empty("name", &req.name)?,
        category: req.category,
        quantity: req.quantity,
        unit: req.unit,
        reorder_level: req.reorder_level,
        expiry_date: req.expiry_date,
    };

    InventoryService::new(state.cfg.clone())
        .add(new)
        .map(Json)
        .map_err(map_record_error)
}

#[utoipa::path(
    get,
    path = "/inventory",
    responses(
        (status = 200, description = "All inventory items", body = ListItemsRes)
    )
)]
/// List inventory items
pub async fn list_items(State(state): State<AppState>) -> Json<ListItemsRes> {
    let items = InventoryService::new(state.cfg.clone()).list();
    Json(ListItemsRes { items })
}

#[utoipa::path(
    get,
    path = "/inventory/low-stock",
    responses(
        (status = 200, description = "Items at or below their reorder level", body = ListItemsRes)
    )
)]
/// List low-stock items
pub async fn low_stock(State(state): State<AppState>) -> Json<ListItemsRes> {
    let items = InventoryService::new(state.cfg.clone()).low_stock();
    Json(ListItemsRes { items })
}

#[utoipa::path(
    post,
    path = "/inventory/{id}/adjust",
    params(("id" = String, Path, description = "Item identifier")),
    request_body = AdjustStockReq,
    responses(
        (status = 200, description = "Adjusted item", body = InventoryItem),
        (status = 400, description = "Adjustment would overdraw the stock"),
        (status = 404, description = "No such item")
    )
)]
/// Adjust an item's stock
pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AdjustStockReq>,
) -> ApiResult<InventoryItem> {
    let id = parse_id(&id)?;

    InventoryService::new(state.cfg.clone())
        .adjust_stock(&id, req.delta)
        .map(Json)
        .map_err(map_record_error)
}
