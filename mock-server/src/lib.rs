//! In-memory imitation of the Smartsheet REST API.
//!
//! Serves the subset of `/2.0` that the client's integration tests exercise,
//! using the real wire shapes: plain entities, index envelopes with page
//! clamping, bulk envelopes with `failedItems`, and an `ErrorObject` with a
//! fresh `refId` on every failure. Every route except `/testing/*` requires
//! `Authorization: Bearer <token>`.

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: i64,
    pub index: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default)]
    pub primary: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub column_id: i64,
    #[serde(default)]
    pub value: Value,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: i64,
    pub sheet_id: i64,
    pub row_number: i64,
    pub cells: Vec<Cell>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub id: i64,
    pub name: String,
    pub version: i64,
    pub total_row_count: i64,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewColumn {
    title: String,
    #[serde(rename = "type")]
    column_type: String,
    #[serde(default)]
    primary: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewSheet {
    name: String,
    #[serde(default)]
    columns: Vec<NewColumn>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RowInput {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    cells: Vec<Cell>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct PageQuery {
    page: Option<i64>,
    page_size: Option<i64>,
    include_all: Option<bool>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RowsQuery {
    allow_partial_success: Option<bool>,
    ids: Option<String>,
    ignore_rows_not_found: Option<bool>,
}

#[derive(Default)]
struct Db {
    sheets: BTreeMap<i64, Sheet>,
    next_id: i64,
}

impl Db {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone)]
struct AppState {
    token: Arc<str>,
    db: Arc<RwLock<Db>>,
}

/// A failed call, rendered as the service's error object.
struct Failure {
    status: StatusCode,
    code: u32,
    message: String,
}

impl Failure {
    fn new(status: StatusCode, code: u32, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, 1006, "Not Found")
    }

    fn body(&self) -> Value {
        error_object(self.code, &self.message)
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

fn error_object(code: u32, message: &str) -> Value {
    json!({
        "errorCode": code,
        "message": message,
        "refId": Uuid::new_v4().simple().to_string(),
    })
}

fn success(result: Value, version: Option<i64>) -> Json<Value> {
    let mut body = json!({"message": "SUCCESS", "resultCode": 0, "result": result});
    if let Some(version) = version {
        body["version"] = json!(version);
    }
    Json(body)
}

pub fn app(token: &str) -> Router {
    let state = AppState {
        token: Arc::from(token),
        db: Arc::new(RwLock::new(Db::default())),
    };

    let api = Router::new()
        .route("/sheets", get(list_sheets).post(create_sheet))
        .route("/sheets/{id}", get(get_sheet).delete(delete_sheet))
        .route("/sheets/{id}/columns", get(list_columns))
        .route(
            "/sheets/{id}/rows",
            post(add_rows).put(update_rows).delete(delete_rows),
        )
        .route("/users/me", get(current_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .with_state(state);

    let testing = Router::new()
        .route("/testing/malformed", get(malformed))
        .route("/testing/gateway-error", get(gateway_error))
        .route("/testing/binary-error", get(binary_error))
        .route("/testing/slow", get(slow));

    Router::new().nest("/2.0", api.merge(testing))
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", state.token);
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        tracing::debug!(path = %request.uri().path(), "rejecting request with bad token");
        return Failure::new(StatusCode::UNAUTHORIZED, 1002, "Your Access Token is invalid.")
            .into_response();
    }
    next.run(request).await
}

/// Slice `items` into one page. A page past the end is clamped to the last one.
fn paginate(items: Vec<Value>, query: &PageQuery) -> Value {
    let total_count = items.len() as i64;
    if query.include_all.unwrap_or(false) {
        return json!({
            "pageNumber": 1,
            "totalPages": 1,
            "totalCount": total_count,
            "data": items,
        });
    }

    let page_size = query.page_size.unwrap_or(100).max(1);
    let total_pages = ((total_count + page_size - 1) / page_size).max(1);
    let page_number = query.page.unwrap_or(1).clamp(1, total_pages);
    let data: Vec<Value> = items
        .into_iter()
        .skip(((page_number - 1) * page_size) as usize)
        .take(page_size as usize)
        .collect();

    json!({
        "pageNumber": page_number,
        "pageSize": page_size,
        "totalPages": total_pages,
        "totalCount": total_count,
        "data": data,
    })
}

async fn list_sheets(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Json<Value> {
    let db = state.db.read().await;
    let items = db
        .sheets
        .values()
        .map(|s| json!({"id": s.id, "name": s.name, "accessLevel": "OWNER", "version": s.version}))
        .collect();
    Json(paginate(items, &query))
}

async fn create_sheet(State(state): State<AppState>, Json(input): Json<NewSheet>) -> Result<Json<Value>, Failure> {
    if input.columns.iter().filter(|c| c.primary).count() != 1 {
        return Err(Failure::new(
            StatusCode::BAD_REQUEST,
            1054,
            "A sheet must have exactly one primary column.",
        ));
    }

    let mut db = state.db.write().await;
    let id = db.allocate_id();
    let mut columns = Vec::with_capacity(input.columns.len());
    for (index, c) in input.columns.into_iter().enumerate() {
        columns.push(Column {
            id: db.allocate_id(),
            index: index as i64,
            title: c.title,
            column_type: c.column_type,
            primary: c.primary,
        });
    }
    let sheet = Sheet {
        id,
        name: input.name,
        version: 0,
        total_row_count: 0,
        columns,
        rows: Vec::new(),
    };
    db.sheets.insert(id, sheet.clone());
    tracing::info!(sheet_id = id, "created sheet");
    Ok(success(json!(sheet), None))
}

async fn get_sheet(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Sheet>, Failure> {
    let db = state.db.read().await;
    db.sheets.get(&id).cloned().map(Json).ok_or_else(Failure::not_found)
}

async fn delete_sheet(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Value>, Failure> {
    let mut db = state.db.write().await;
    db.sheets.remove(&id).ok_or_else(Failure::not_found)?;
    Ok(Json(json!({"message": "SUCCESS", "resultCode": 0})))
}

async fn list_columns(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, Failure> {
    let db = state.db.read().await;
    let sheet = db.sheets.get(&id).ok_or_else(Failure::not_found)?;
    let items = sheet.columns.iter().map(|c| json!(c)).collect();
    Ok(Json(paginate(items, &query)))
}

/// Why a row in a bulk request is rejected, if it is.
fn validate_row(sheet: &Sheet, row: &RowInput) -> Option<Failure> {
    if row.cells.is_empty() {
        return Some(Failure::new(
            StatusCode::BAD_REQUEST,
            1012,
            "Required object attribute(s) are missing from your request: row.cells.",
        ));
    }
    row.cells
        .iter()
        .find(|cell| !sheet.columns.iter().any(|c| c.id == cell.column_id))
        .map(|cell| {
            Failure::new(
                StatusCode::BAD_REQUEST,
                1036,
                format!("The columnId {} is invalid.", cell.column_id),
            )
        })
}

/// Envelope for a bulk call; `resultCode` 3 when anything failed.
fn bulk_envelope(result: Vec<Value>, failed: Vec<Value>, version: i64) -> Json<Value> {
    let (message, code) = if failed.is_empty() {
        ("SUCCESS", 0)
    } else {
        ("PARTIAL_SUCCESS", 3)
    };
    Json(json!({
        "message": message,
        "resultCode": code,
        "version": version,
        "result": result,
        "failedItems": failed,
    }))
}

async fn add_rows(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<RowsQuery>,
    Json(input): Json<Vec<RowInput>>,
) -> Result<Json<Value>, Failure> {
    let partial = query.allow_partial_success.unwrap_or(false);
    let mut guard = state.db.write().await;
    let db = &mut *guard;
    let sheet = db.sheets.get_mut(&id).ok_or_else(Failure::not_found)?;

    let mut accepted = Vec::new();
    let mut failed = Vec::new();
    for (index, row) in input.into_iter().enumerate() {
        match validate_row(sheet, &row) {
            Some(failure) if partial => failed.push(json!({"index": index, "error": failure.body()})),
            Some(failure) => return Err(failure),
            None => accepted.push(row),
        }
    }

    let mut added = Vec::with_capacity(accepted.len());
    for row in accepted {
        db.next_id += 1;
        let row = Row {
            id: db.next_id,
            sheet_id: sheet.id,
            row_number: sheet.rows.len() as i64 + 1,
            cells: row.cells,
        };
        sheet.rows.push(row.clone());
        added.push(json!(row));
    }
    if !added.is_empty() {
        sheet.version += 1;
    }
    sheet.total_row_count = sheet.rows.len() as i64;
    Ok(bulk_envelope(added, failed, sheet.version))
}

async fn update_rows(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<RowsQuery>,
    Json(input): Json<Vec<RowInput>>,
) -> Result<Json<Value>, Failure> {
    let partial = query.allow_partial_success.unwrap_or(false);
    let mut db = state.db.write().await;
    let sheet = db.sheets.get_mut(&id).ok_or_else(Failure::not_found)?;

    let mut updates = Vec::new();
    let mut failed = Vec::new();
    for (index, row) in input.into_iter().enumerate() {
        let row_id = row.id.unwrap_or_default();
        let failure = if sheet.rows.iter().any(|r| r.id == row_id) {
            validate_row(sheet, &row)
        } else {
            Some(Failure::not_found())
        };
        match failure {
            Some(failure) if partial => {
                failed.push(json!({"index": index, "rowId": row_id, "error": failure.body()}))
            }
            Some(failure) => return Err(failure),
            None => updates.push((row_id, row.cells)),
        }
    }

    let mut updated = Vec::with_capacity(updates.len());
    for (row_id, cells) in updates {
        if let Some(existing) = sheet.rows.iter_mut().find(|r| r.id == row_id) {
            for cell in cells {
                match existing.cells.iter_mut().find(|c| c.column_id == cell.column_id) {
                    Some(slot) => slot.value = cell.value,
                    None => existing.cells.push(cell),
                }
            }
            updated.push(json!(existing));
        }
    }
    if !updated.is_empty() {
        sheet.version += 1;
    }
    Ok(bulk_envelope(updated, failed, sheet.version))
}

async fn delete_rows(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<RowsQuery>,
) -> Result<Json<Value>, Failure> {
    let ids: Vec<i64> = query
        .ids
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| Failure::new(StatusCode::BAD_REQUEST, 1018, "The value for ids is invalid."))?;

    let mut db = state.db.write().await;
    let sheet = db.sheets.get_mut(&id).ok_or_else(Failure::not_found)?;

    let missing = ids.iter().any(|id| !sheet.rows.iter().any(|r| r.id == *id));
    if missing && !query.ignore_rows_not_found.unwrap_or(false) {
        return Err(Failure::not_found());
    }

    let deleted: Vec<i64> = ids
        .into_iter()
        .filter(|id| sheet.rows.iter().any(|r| r.id == *id))
        .collect();
    sheet.rows.retain(|r| !deleted.contains(&r.id));
    for (position, row) in sheet.rows.iter_mut().enumerate() {
        row.row_number = position as i64 + 1;
    }
    sheet.total_row_count = sheet.rows.len() as i64;
    sheet.version += 1;
    Ok(success(json!(deleted), Some(sheet.version)))
}

async fn current_user() -> Json<Value> {
    Json(json!({
        "id": 48569348493401200_i64,
        "email": "mock.user@example.com",
        "firstName": "Mock",
        "lastName": "User",
        "admin": true,
        "licensedSheetCreator": true,
        "status": "ACTIVE",
    }))
}

async fn malformed() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], "{\"id\": 1,")
}

async fn gateway_error() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "<html><body>502 Bad Gateway</body></html>")
}

/// A 503 whose body is not valid UTF-8.
async fn binary_error() -> impl IntoResponse {
    (StatusCode::SERVICE_UNAVAILABLE, vec![0xff_u8, 0xfe, 0x00, 0x41])
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!({"id": 1}))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Sheet {
        Sheet {
            id: 1,
            name: "Plan".to_string(),
            version: 0,
            total_row_count: 0,
            columns: vec![Column {
                id: 10,
                index: 0,
                title: "Task".to_string(),
                column_type: "TEXT_NUMBER".to_string(),
                primary: true,
            }],
            rows: Vec::new(),
        }
    }

    fn row(cells: Value) -> RowInput {
        serde_json::from_value(json!({"cells": cells})).unwrap()
    }

    #[test]
    fn row_without_cells_is_rejected() {
        let failure = validate_row(&sheet(), &row(json!([]))).unwrap();
        assert_eq!(failure.code, 1012);
    }

    #[test]
    fn row_with_unknown_column_is_rejected() {
        let failure = validate_row(&sheet(), &row(json!([{"columnId": 99, "value": "x"}]))).unwrap();
        assert_eq!(failure.code, 1036);
        assert!(failure.message.contains("99"));
    }

    #[test]
    fn valid_row_passes() {
        assert!(validate_row(&sheet(), &row(json!([{"columnId": 10, "value": "x"}]))).is_none());
    }

    #[test]
    fn error_objects_get_fresh_ref_ids() {
        let a = error_object(1006, "Not Found");
        let b = error_object(1006, "Not Found");
        assert_ne!(a["refId"], b["refId"]);
        assert_eq!(a["errorCode"], 1006);
    }

    #[test]
    fn page_past_the_end_is_clamped() {
        let items: Vec<Value> = (0..5).map(|i| json!({"id": i})).collect();
        let query = PageQuery {
            page: Some(9),
            page_size: Some(2),
            include_all: None,
        };
        let page = paginate(items, &query);
        assert_eq!(page["pageNumber"], 3);
        assert_eq!(page["totalPages"], 3);
        assert_eq!(page["data"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn include_all_returns_everything() {
        let items: Vec<Value> = (0..150).map(|i| json!({"id": i})).collect();
        let query = PageQuery {
            include_all: Some(true),
            ..PageQuery::default()
        };
        let page = paginate(items, &query);
        assert_eq!(page["data"].as_array().unwrap().len(), 150);
        assert!(page.get("pageSize").is_none());
    }
}
