//! REST API endpoints for the credit ledger.

use crate::ApiApplication;
use aide::axum::{ApiRouter, routing::get};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use mgx_core::{
    models::WalletRecord,
    ports::{LedgerRepository as _, Repository},
};
use tracing::{Level, event};

/// Creates a router with wallet-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with("/", get(list_wallets::<T>), |route| {
            route.security_requirement("jwt").tag("market")
        })
        .api_route_with("/{asset_id}", get(get_wallet::<T>), |route| {
            route.security_requirement("jwt").tag("market")
        })
}

/// Path parameter for wallet-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Id<T> {
    /// The asset whose wallet to look up
    asset_id: T,
}

/// Every asset's credit balance.
///
/// # Returns
///
/// - `200 OK`: All wallets
/// - `401 Unauthorized`: Missing view permissions
/// - `500 Internal Server Error`: Database query failed
async fn list_wallets<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<
    Json<
        Vec<
            WalletRecord<
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
        .list_wallets()
        .await
        .map(Json)
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// One asset's credit balance.
///
/// # Returns
///
/// - `200 OK`: The wallet
/// - `401 Unauthorized`: Missing view permissions
/// - `404 Not Found`: No wallet for that asset
/// - `500 Internal Server Error`: Database query failed
async fn get_wallet<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(Id { asset_id }): Path<Id<<T::Repository as Repository>::AssetId>>,
) -> Result<
    Json<
        WalletRecord<
            <T::Repository as Repository>::AssetId,
            <T::Repository as Repository>::DateTime,
        >,
    >,
    StatusCode,
> {
    if !app.can_view_market(&auth).await {
        return Err(StatusCode::UNAUTHORIZED);
    }

    app.database()
        .get_wallet(asset_id)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
