//! REST API endpoints for the asset registry.
//!
//! Assets are the participants of the exchange; creating one also
//! provisions its wallet. Flexible-load profiles hang off their asset.

use crate::ApiApplication;
use aide::axum::{
    ApiRouter,
    routing::{get, put},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use mgx_core::{
    models::{AssetKind, AssetRecord, FlexibleLoadRecord},
    ports::{AssetRepository as _, FlexibleLoadRepository as _, Repository},
};
use tracing::{Level, event};

/// Creates a router with asset-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get(list_assets::<T>).post(create_asset::<T>),
            |route| route.security_requirement("jwt").tag("asset"),
        )
        .api_route_with(
            "/{asset_id}",
            get(get_asset::<T>)
                .patch(update_asset::<T>)
                .delete(delete_asset::<T>),
            |route| route.security_requirement("jwt").tag("asset"),
        )
        .api_route_with(
            "/{asset_id}/profile",
            put(upsert_profile::<T>),
            |route| route.security_requirement("jwt").tag("asset"),
        )
}

/// Path parameter for asset-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Id<T> {
    /// The unique identifier of the asset
    asset_id: T,
}

/// Request body for creating an asset.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct CreateAssetDto {
    /// Human-readable name
    name: String,
    /// The asset's category
    kind: AssetKind,
    /// Nameplate capacity, in kW
    max_capacity_kw: f64,
}

/// Request body for editing an asset; omitted fields are left unchanged.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct UpdateAssetDto {
    name: Option<String>,
    max_capacity_kw: Option<f64>,
    is_active: Option<bool>,
}

/// Request body for a flexible-load profile.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct ProfileDto {
    min_kw: f64,
    max_kw: f64,
    is_shiftable: bool,
    preferred_start_hour: u8,
    preferred_end_hour: u8,
}

/// List every registered asset.
///
/// # Returns
///
/// - `200 OK`: All assets, ordered by name
/// - `401 Unauthorized`: Missing view permissions
/// - `500 Internal Server Error`: Database query failed
async fn list_assets<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Vec<AssetRecord<<T::Repository as Repository>::AssetId>>>, StatusCode> {
    if !app.can_view_market(&auth).await {
        return Err(StatusCode::UNAUTHORIZED);
    }

    app.database()
        .list_assets()
        .await
        .map(Json)
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Register a new asset (and its wallet).
///
/// # Returns
///
/// - `201 Created`: The new asset
/// - `401 Unauthorized`: Missing manage permissions
/// - `500 Internal Server Error`: Database operation failed
async fn create_asset<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(body): Json<CreateAssetDto>,
) -> Result<
    (
        StatusCode,
        Json<AssetRecord<<T::Repository as Repository>::AssetId>>,
    ),
    StatusCode,
> {
    if !app.can_manage_assets(&auth).await {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let asset_id = app.generate_asset_id();
    let starting_credit = app.market_config().starting_credit;
    app.database()
        .create_asset(
            asset_id,
            body.name,
            body.kind,
            body.max_capacity_kw,
            starting_credit,
            app.now(),
        )
        .await
        .map(|asset| (StatusCode::CREATED, Json(asset)))
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Retrieve a single asset.
///
/// # Returns
///
/// - `200 OK`: The asset
/// - `401 Unauthorized`: Missing view permissions
/// - `404 Not Found`: No such asset
/// - `500 Internal Server Error`: Database query failed
async fn get_asset<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(Id { asset_id }): Path<Id<<T::Repository as Repository>::AssetId>>,
) -> Result<Json<AssetRecord<<T::Repository as Repository>::AssetId>>, StatusCode> {
    if !app.can_view_market(&auth).await {
        return Err(StatusCode::UNAUTHORIZED);
    }

    app.database()
        .get_asset(asset_id)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Edit an asset's name, capacity, or activity flag.
///
/// # Returns
///
/// - `204 No Content`: Updated
/// - `401 Unauthorized`: Missing manage permissions
/// - `404 Not Found`: No such asset
/// - `500 Internal Server Error`: Database operation failed
async fn update_asset<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(Id { asset_id }): Path<Id<<T::Repository as Repository>::AssetId>>,
    Json(body): Json<UpdateAssetDto>,
) -> Result<StatusCode, StatusCode> {
    if !app.can_manage_assets(&auth).await {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let updated = app
        .database()
        .update_asset(asset_id, body.name, body.max_capacity_kw, body.is_active)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    if updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// Remove an asset and everything associated to it.
///
/// # Returns
///
/// - `204 No Content`: Removed
/// - `401 Unauthorized`: Missing manage permissions
/// - `404 Not Found`: No such asset
/// - `500 Internal Server Error`: Database operation failed
async fn delete_asset<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(Id { asset_id }): Path<Id<<T::Repository as Repository>::AssetId>>,
) -> Result<StatusCode, StatusCode> {
    if !app.can_manage_assets(&auth).await {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let deleted = app.database().delete_asset(asset_id).await.map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// Create or replace the asset's flexible-load profile.
///
/// # Returns
///
/// - `204 No Content`: Profile stored
/// - `401 Unauthorized`: Missing manage permissions
/// - `404 Not Found`: No such asset
/// - `500 Internal Server Error`: Database operation failed
async fn upsert_profile<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(Id { asset_id }): Path<Id<<T::Repository as Repository>::AssetId>>,
    Json(body): Json<ProfileDto>,
) -> Result<StatusCode, StatusCode> {
    if !app.can_manage_assets(&auth).await {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let db = app.database();
    let exists = db.get_asset(asset_id.clone()).await.map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if exists.is_none() {
        return Err(StatusCode::NOT_FOUND);
    }

    db.upsert_profile(FlexibleLoadRecord {
        asset_id,
        min_kw: body.min_kw,
        max_kw: body.max_kw,
        is_shiftable: body.is_shiftable,
        preferred_start_hour: body.preferred_start_hour,
        preferred_end_hour: body.preferred_end_hour,
    })
    .await
    .map(|_| StatusCode::NO_CONTENT)
    .map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
