//! REST API endpoints for the trade log.

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
    models::TradeRecord,
    ports::{Repository, TradeRepository as _},
};
use std::sync::Arc;
use tracing::{Level, event};

/// Creates a router with trade-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new().api_route_with("/", get(trade_history::<T>), |route| {
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

/// The most recent trades, newest first.
///
/// # Returns
///
/// - `200 OK`: Trades
/// - `401 Unauthorized`: Missing view permissions
/// - `500 Internal Server Error`: Database query failed
async fn trade_history<T: ApiApplication>(
    State(app): State<T>,
    Extension(config): Extension<Arc<AxumConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Query(query): Query<Limit>,
) -> Result<
    Json<
        Vec<
            TradeRecord<
                <T::Repository as Repository>::TradeId,
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
        .trade_history(limit)
        .await
        .map(Json)
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
