//! REST API endpoints for historical readings and daily statistics.

use crate::{ApiApplication, config::AxumConfig};
use aide::axum::{ApiRouter, routing::get};
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use mgx_core::{
    models::{DayStats, ReadingRecord},
    ports::{ReadingRepository as _, Repository},
};
use std::sync::Arc;
use tracing::{Level, event};

/// Creates a router with reading-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with("/", get(recent_readings::<T>), |route| {
            route.security_requirement("jwt").tag("market")
        })
        .api_route_with("/stats", get(day_stats::<T>), |route| {
            route.security_requirement("jwt").tag("market")
        })
}

/// Query parameter capping the number of returned rows.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Limit {
    /// Maximum rows to return; defaults to (and is capped by) the server's
    /// page limit
    limit: Option<usize>,
}

/// The most recent readings, newest first.
///
/// # Returns
///
/// - `200 OK`: Readings
/// - `401 Unauthorized`: Missing view permissions
/// - `500 Internal Server Error`: Database query failed
async fn recent_readings<T: ApiApplication>(
    State(app): State<T>,
    Extension(config): Extension<Arc<AxumConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Query(query): Query<Limit>,
) -> Result<
    Json<
        Vec<
            ReadingRecord<
                <T::Repository as Repository>::AssetId,
                <T::Repository as Repository>::DateTime,
            >,
        >,
    >,
    StatusCode,
> {
    if !app.can_view_market(&auth).await {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let limit = query.limit.unwrap_or(config.page_limit).min(config.page_limit);
    app.database()
        .recent_readings(limit)
        .await
        .map(Json)
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Today's production/consumption totals, efficiency score, and top
/// consumer.
///
/// # Returns
///
/// - `200 OK`: The statistics
/// - `401 Unauthorized`: Missing view permissions
/// - `500 Internal Server Error`: Database query failed
async fn day_stats<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<DayStats<<T::Repository as Repository>::AssetId>>, StatusCode> {
    if !app.can_view_market(&auth).await {
        return Err(StatusCode::UNAUTHORIZED);
    }

    app.database()
        .day_stats(app.now())
        .await
        .map(Json)
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
