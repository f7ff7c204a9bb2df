#![allow(dead_code)]

use mgx_core::{
    models::{AssetKind, Confidence, ForecastRecord, MarketConfig},
    ports::AssetRepository as _,
};
use mgx_sqlite::{
    Db,
    config::SqliteConfig,
    types::{AssetId, DateTime},
};
use time::macros::datetime;

/// A fixed cycle hour so tests are independent of the wall clock.
pub fn cycle_hour() -> DateTime {
    DateTime::from(datetime!(2025-06-15 12:00:00 UTC))
}

pub async fn open_db() -> anyhow::Result<Db> {
    Ok(Db::open(&SqliteConfig::default()).await?)
}

pub async fn add_asset(
    db: &Db,
    name: &str,
    kind: AssetKind,
    max_capacity_kw: f64,
) -> anyhow::Result<AssetId> {
    let asset_id = AssetId::random();
    db.create_asset(
        asset_id,
        name.to_owned(),
        kind,
        max_capacity_kw,
        MarketConfig::default().starting_credit,
        cycle_hour(),
    )
    .await?;
    Ok(asset_id)
}

pub fn forecast(
    asset_id: AssetId,
    hour: DateTime,
    expected_kw: f64,
) -> ForecastRecord<AssetId, DateTime> {
    ForecastRecord {
        asset_id,
        hour,
        expected_kw,
        confidence: Confidence::Medium,
    }
}
