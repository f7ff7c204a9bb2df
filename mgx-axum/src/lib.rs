#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod asset_routes;
mod cycle_routes;
mod forecast_routes;
mod market_routes;
mod offer_routes;
mod reading_routes;
mod trade_routes;
mod wallet_routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{Extension, Json};
use headers::{Authorization, authorization::Bearer};
use mgx_core::ports::{Application, Repository};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use std::{fmt::Display, sync::Arc};

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct a full API router with the given state and config.
///
/// The generated OpenAPI document is returned alongside the router so
/// callers can dump it without standing a server up.
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> (axum::Router, Arc<OpenApi>) {
    let mut api = OpenApi::default();
    let router = ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/assets", asset_routes::router())
        .nest("/readings", reading_routes::router())
        .nest("/forecasts", forecast_routes::router())
        .nest("/offers", offer_routes::router())
        .nest("/trades", trade_routes::router())
        .nest("/wallets", wallet_routes::router())
        .nest("/market", market_routes::router())
        .nest("/cycle", cycle_routes::router())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs);

    let api = Arc::new(api);
    let router = router
        .layer(Extension(api.clone())) // Arc matters: the spec is served on every /docs hit
        .layer(Extension(Arc::new(config)))
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state);

    (router, api)
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .expect("Unable to bind to address");

    tracing::info!(
        "Listening for requests on {}",
        listener.local_addr().unwrap()
    );

    let (service, _) = router(app, config);
    axum::serve(listener, service).await
}

/// Axum imposes all sorts of constraints on what can pass for state, and
/// the handlers need the repository's associated types to be serializable
/// and schema-generating. This trait, coupled with a blanket
/// implementation, specifies it all upfront and in one place: if a function
/// takes a generic `T: ApiApplication`, everything one might reasonably
/// want to do in a handler works.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Context = Authorization<Bearer>,
        Repository: Clone
                        + Send
                        + Sync
                        + 'static
                        + Repository<
            DateTime: Display + Serialize + DeserializeOwned + JsonSchema,
            AssetId: Display + Serialize + DeserializeOwned + JsonSchema,
            OfferId: Display + Serialize + DeserializeOwned + JsonSchema,
            TradeId: Display + Serialize + DeserializeOwned + JsonSchema,
        >,
        Auctioneer: Send + 'static,
    >
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<
            Context = Authorization<Bearer>,
            Repository: Clone
                            + Send
                            + Sync
                            + 'static
                            + Repository<
                DateTime: Display + Serialize + DeserializeOwned + JsonSchema,
                AssetId: Display + Serialize + DeserializeOwned + JsonSchema,
                OfferId: Display + Serialize + DeserializeOwned + JsonSchema,
                TradeId: Display + Serialize + DeserializeOwned + JsonSchema,
            >,
            Auctioneer: Send + 'static,
        >
{
}
