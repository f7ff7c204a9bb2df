//! REST API endpoint for executing one trading cycle.
//!
//! A cycle is the matching + settlement pass over the active offer book.
//! The repository runs it as a single transaction, so a failed pass leaves
//! the previous cycle's state fully intact and queryable.

use crate::ApiApplication;
use aide::axum::{ApiRouter, routing::post};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use mgx_core::{
    models::TradeRecord,
    ports::{CycleRepository as _, Repository},
};
use tracing::{Level, event};

/// Creates a router with cycle-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new().api_route_with("/run", post(run_cycle::<T>), |route| {
        route.security_requirement("jwt").tag("market").tag("admin")
    })
}

/// Run one matching + settlement pass at the current timestamp.
///
/// # Authorization
///
/// Requires `can_run_cycle` permission.
///
/// # Returns
///
/// - `200 OK`: The trades the pass created
/// - `401 Unauthorized`: Missing or insufficient permissions
/// - `500 Internal Server Error`: The pass was rolled back
async fn run_cycle<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
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
    (StatusCode, String),
> {
    if !app.can_run_cycle(&auth).await {
        return Err((StatusCode::UNAUTHORIZED, "not authorized".to_string()));
    }

    let as_of = app.now();
    app.database()
        .run_cycle(as_of, app.auctioneer(), &app.market_config())
        .await
        .map(Json)
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to settle trading cycle".to_string(),
            )
        })
}
