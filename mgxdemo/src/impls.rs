//! Application implementation with JWT-based authorization.
//!
//! This module wires the SQLite repositories and the double-auction engine
//! together behind the `Application` port, making authorization decisions
//! from JWT claims: any valid token may read market data, while asset
//! management and cycle execution require an `admin: true` custom claim.

use headers::{Authorization, authorization::Bearer};
use jwt_simple::{
    claims::JWTClaims,
    prelude::{HS256Key, MACLike},
};
use mgx_auction::DoubleAuction;
use mgx_core::{models::MarketConfig, ports::Application};
use mgx_sqlite::{
    Db,
    types::{AssetId, DateTime},
};
use serde::{Deserialize, Serialize};

/// Main application implementation combining all system components.
#[derive(Clone)]
pub struct DemoApp {
    /// Database connection for persistent storage
    pub db: Db,
    /// HMAC key for JWT token verification
    pub key: HS256Key,
    /// Market pricing constants, fixed at startup from the app config
    pub market: MarketConfig,
}

impl DemoApp {
    /// Extract and verify JWT claims from the authorization header.
    fn claims(&self, context: &Authorization<Bearer>) -> Option<JWTClaims<CustomJWTClaims>> {
        let token = context.0.token();
        self.key.verify_token::<CustomJWTClaims>(token, None).ok()
    }
}

impl Application for DemoApp {
    type Context = Authorization<Bearer>;
    type Repository = Db;
    type Auctioneer = DoubleAuction;

    fn database(&self) -> &Db {
        &self.db
    }

    fn auctioneer(&self) -> DoubleAuction {
        DoubleAuction
    }

    fn market_config(&self) -> MarketConfig {
        self.market
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }

    fn generate_asset_id(&self) -> AssetId {
        AssetId::random()
    }

    async fn can_view_market(&self, context: &Self::Context) -> bool {
        // Any holder of a valid token may read; this is also the place to
        // hang rate limiting off, should a token need it.
        self.claims(context).is_some()
    }

    async fn can_manage_assets(&self, context: &Self::Context) -> bool {
        self.claims(context)
            .map(|claims| claims.custom.admin)
            .unwrap_or(false)
    }

    async fn can_run_cycle(&self, context: &Self::Context) -> bool {
        self.claims(context)
            .map(|claims| claims.custom.admin)
            .unwrap_or(false)
    }
}

/// Custom claims structure for JWT tokens.
#[derive(Serialize, Deserialize)]
pub struct CustomJWTClaims {
    /// Indicates whether the token holder has admin privileges.
    #[serde(default)]
    pub admin: bool,
}
