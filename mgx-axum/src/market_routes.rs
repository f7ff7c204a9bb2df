//! REST API endpoints for market aggregations.

use crate::ApiApplication;
use aide::axum::{ApiRouter, routing::get};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use mgx_core::{
    models::{LoadShiftRecommendation, MarketSummary},
    ports::{FlexibleLoadRepository as _, TradeRepository as _},
};
use tracing::{Level, event};

/// Creates a router with market-statistics endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with("/", get(market_summary::<T>), |route| {
            route.security_requirement("jwt").tag("market")
        })
        .api_route_with("/recommendations", get(recommendations::<T>), |route| {
            route.security_requirement("jwt").tag("market")
        })
}

/// Today's market summary: internal volume, average internal price, and
/// grid dependency.
///
/// # Returns
///
/// - `200 OK`: The summary
/// - `401 Unauthorized`: Missing view permissions
/// - `500 Internal Server Error`: Database query failed
async fn market_summary<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<MarketSummary>, StatusCode> {
    if !app.can_view_market(&auth).await {
        return Err(StatusCode::UNAUTHORIZED);
    }

    app.database()
        .market_summary(app.now())
        .await
        .map(Json)
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Suggested shifts of flexible loads into the best surplus window.
async fn recommendations<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Vec<LoadShiftRecommendation>>, StatusCode> {
    if !app.can_view_market(&auth).await {
        return Err(StatusCode::UNAUTHORIZED);
    }

    app.database()
        .load_shift_recommendations()
        .await
        .map(Json)
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
