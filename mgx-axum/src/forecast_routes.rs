//! REST API endpoints for the forecast horizon.
//!
//! The horizon is rebuilt wholesale by the generation endpoint; the read
//! endpoints expose the raw points, the hourly fleet summary, and the
//! surplus/deficit windows derived from it.

use crate::ApiApplication;
use aide::axum::{
    ApiRouter,
    routing::{get, post},
};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use mgx_core::{
    models::{ForecastRecord, ForecastSummary, SurplusWindow},
    ports::{ForecastRepository as _, Repository},
};
use tracing::{Level, event};

/// Creates a router with forecast-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with("/", get(list_forecasts::<T>), |route| {
            route.security_requirement("jwt").tag("forecast")
        })
        .api_route_with("/generate", post(generate_forecasts::<T>), |route| {
            route.security_requirement("jwt").tag("forecast").tag("admin")
        })
        .api_route_with("/summary", get(forecast_summary::<T>), |route| {
            route.security_requirement("jwt").tag("forecast")
        })
        .api_route_with("/windows", get(surplus_windows::<T>), |route| {
            route.security_requirement("jwt").tag("forecast")
        })
}

/// The current forecast horizon, ordered by hour.
///
/// # Returns
///
/// - `200 OK`: Forecast points
/// - `401 Unauthorized`: Missing view permissions
/// - `500 Internal Server Error`: Database query failed
async fn list_forecasts<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<
    Json<
        Vec<
            ForecastRecord<
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
        .list_forecasts()
        .await
        .map(Json)
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Rebuild the next 24 hours of forecasts from historical readings.
///
/// # Returns
///
/// - `200 OK`: The number of forecast points written
/// - `401 Unauthorized`: Missing cycle permissions
/// - `500 Internal Server Error`: Database operation failed
async fn generate_forecasts<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<usize>, (StatusCode, String)> {
    if !app.can_run_cycle(&auth).await {
        return Err((StatusCode::UNAUTHORIZED, "not authorized".to_string()));
    }

    app.database()
        .generate_forecasts(app.now(), 24)
        .await
        .map(Json)
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to generate forecasts".to_string(),
            )
        })
}

/// Fleet-wide production/consumption totals per forecast hour.
async fn forecast_summary<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Vec<ForecastSummary<<T::Repository as Repository>::DateTime>>>, StatusCode> {
    if !app.can_view_market(&auth).await {
        return Err(StatusCode::UNAUTHORIZED);
    }

    app.database()
        .forecast_summary()
        .await
        .map(Json)
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Contiguous surplus/deficit windows over the forecast horizon.
async fn surplus_windows<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Vec<SurplusWindow<<T::Repository as Repository>::DateTime>>>, StatusCode> {
    if !app.can_view_market(&auth).await {
        return Err(StatusCode::UNAUTHORIZED);
    }

    app.database()
        .surplus_windows()
        .await
        .map(Json)
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
