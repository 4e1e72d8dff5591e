//! Polar routes, mounted under `/polars/api/v1`.
//!
//! Handlers hand the blocking file work to the blocking thread pool and map
//! domain errors through `ApiError`.

use crate::error::{ApiError, ApiResult};
use crate::middleware::ApiMetrics;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use polar_store::{Polar, PolarApi, PolarError};
use serde::{Deserialize, Deserializer};
use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::Arc;

/// Mount point of the versioned API.
pub const API_BASE: &str = "/polars/api/v1";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub polars: Arc<dyn PolarApi>,
    pub metrics: Arc<ApiMetrics>,
}

/// Routes relative to `API_BASE`.
pub fn polar_routes() -> Router<AppState> {
    Router::new()
        .route("/polars", get(list_polars).post(create_polar))
        .route(
            "/polars/:id",
            get(get_polar).put(update_polar).delete(delete_polar),
        )
        .route("/polars/:id/archive", post(archive_polar))
        .route("/polars/:id/restore", post(restore_polar))
}

/// Sort direction for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Order {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            _ => Err(()),
        }
    }
}

/// Query string of `GET /polars`.
///
/// Values that do not parse are ignored rather than rejected, so
/// `?order=bogus` or `?polar_id=300` fall back to a plain listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// List the archive instead of active polars.
    #[serde(default, deserialize_with = "lenient")]
    pub archived: Option<bool>,
    /// Look up a single polar by numeric id instead of listing.
    #[serde(default, deserialize_with = "lenient")]
    pub polar_id: Option<u8>,
    /// `id` or `_id`; no sorting when absent.
    pub sort_by: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub order: Option<Order>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

/// Sort polars in place by `id` (default) or by numeric `_id`.
pub fn sort_polars(polars: &mut [Polar], sort_by: &str, order: Order) {
    polars.sort_by(|a, b| {
        let (a, b) = match order {
            Order::Asc => (a, b),
            Order::Desc => (b, a),
        };
        match sort_by {
            "_id" => a.polar_id.cmp(&b.polar_id),
            _ => compare_ids(a, b),
        }
    });
}

fn compare_ids(a: &Polar, b: &Polar) -> Ordering {
    a.id.cmp(&b.id)
}

/// Run a blocking polar operation on the blocking pool.
async fn blocking<T, F>(state: &AppState, op: F) -> ApiResult<T>
where
    F: FnOnce(&dyn PolarApi) -> Result<T, PolarError> + Send + 'static,
    T: Send + 'static,
{
    let polars = Arc::clone(&state.polars);
    tokio::task::spawn_blocking(move || op(polars.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

async fn list_polars(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Response> {
    if let Some(polar_id) = query.polar_id {
        let polar = blocking(&state, move |api| api.find_by_polar_id(polar_id))
            .await?
            .ok_or_else(|| PolarError::NotFound(format!("_id={polar_id}")))?;
        return Ok(Json(polar).into_response());
    }

    let archived = query.archived;
    let mut polars = blocking(&state, move |api| api.list(archived)).await?;
    if let Some(sort_by) = query.sort_by.as_deref() {
        sort_polars(&mut polars, sort_by, query.order.unwrap_or_default());
    }
    Ok(Json(polars).into_response())
}

async fn get_polar(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Polar>> {
    let lookup = id.clone();
    blocking(&state, move |api| api.get(&lookup))
        .await?
        .map(Json)
        .ok_or_else(|| PolarError::NotFound(id).into())
}

async fn create_polar(
    State(state): State<AppState>,
    Json(mut polar): Json<Polar>,
) -> ApiResult<StatusCode> {
    if polar.id.is_none() {
        polar.id = polar.id_from_label();
    }
    blocking(&state, move |api| api.create(&polar)).await?;
    Ok(StatusCode::CREATED)
}

async fn update_polar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(polar): Json<Polar>,
) -> ApiResult<StatusCode> {
    blocking(&state, move |api| api.update(&id, &polar)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_polar(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    blocking(&state, move |api| api.delete(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn archive_polar(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    blocking(&state, move |api| api.archive(&id)).await?;
    Ok(StatusCode::OK)
}

async fn restore_polar(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    blocking(&state, move |api| api.restore(&id)).await?;
    Ok(StatusCode::CREATED)
}
