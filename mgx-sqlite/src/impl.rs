//! Repository trait implementations for the SQLite database.
//!
//! This module contains the implementations of all repository traits
//! defined in `mgx-core` for the SQLite backend.

use crate::{
    Db, Error,
    types::{AssetId, DateTime, OfferId, TradeId},
};
use mgx_core::ports::{MarketRepository, Repository};

mod asset;
mod cycle;
mod flexible;
mod forecast;
mod ledger;
mod offer;
mod reading;

impl Repository for Db {
    type Error = Error;
    type DateTime = DateTime;
    type AssetId = AssetId;
    type OfferId = OfferId;
    type TradeId = TradeId;
}

impl MarketRepository for Db {}
