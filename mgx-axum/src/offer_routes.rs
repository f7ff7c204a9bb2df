//! REST API endpoints for standing offers.

use crate::ApiApplication;
use aide::axum::{
    ApiRouter,
    routing::{get, post},
};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use mgx_core::{
    models::OfferRecord,
    ports::{OfferRepository as _, Repository},
};
use tracing::{Level, event};

/// Creates a router with offer-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with("/", get(active_offers::<T>), |route| {
            route.security_requirement("jwt").tag("market")
        })
        .api_route_with("/generate", post(generate_offers::<T>), |route| {
            route.security_requirement("jwt").tag("market").tag("admin")
        })
}

/// Every offer currently eligible for matching.
///
/// # Returns
///
/// - `200 OK`: The active offer book
/// - `401 Unauthorized`: Missing view permissions
/// - `500 Internal Server Error`: Database query failed
async fn active_offers<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<
    Json<
        Vec<
            OfferRecord<
                <T::Repository as Repository>::OfferId,
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

    app.database()
        .active_offers()
        .await
        .map(Json)
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Replace the active book with offers derived from the current hour's
/// forecasts.
///
/// Re-invoking this before a matching pass simply re-derives the offers;
/// previously active offers are always retired first.
///
/// # Returns
///
/// - `200 OK`: The number of offers created
/// - `401 Unauthorized`: Missing cycle permissions
/// - `500 Internal Server Error`: Database operation failed
async fn generate_offers<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<usize>, (StatusCode, String)> {
    if !app.can_run_cycle(&auth).await {
        return Err((StatusCode::UNAUTHORIZED, "not authorized".to_string()));
    }

    let config = app.market_config();
    app.database()
        .generate_offers(app.now(), &config)
        .await
        .map(Json)
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to generate offers".to_string(),
            )
        })
}
