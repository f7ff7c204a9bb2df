//! First-run provisioning of the demo neighborhood.
//!
//! Seeds a small fleet of assets (with their wallets), a week of hourly
//! readings to forecast from, flexible-load profiles for the batteries,
//! an initial 24-hour forecast, and the first cycle's offers.

use crate::sim;
use mgx_core::{
    models::{AssetKind, FlexibleLoadRecord, MarketConfig, ReadingRecord},
    ports::{
        AssetRepository as _, FlexibleLoadRepository as _, ForecastRepository as _,
        OfferRepository as _, ReadingRepository as _,
    },
};
use mgx_sqlite::{
    Db, Error,
    types::{AssetId, DateTime},
};
use tracing::{Level, event};

const NEIGHBORHOOD: &[(&str, AssetKind, f64)] = &[
    ("North Roof Solar Panel", AssetKind::Solar, 10.0),
    ("East Wing Solar Array", AssetKind::Solar, 15.0),
    ("Main House HVAC", AssetKind::Household, 5.0),
    ("Tesla Wallbox", AssetKind::Battery, 11.0),
    ("Village Water Pump", AssetKind::Household, 2.5),
    ("Community Battery Hub", AssetKind::Battery, 50.0),
    ("Main Grid Connection", AssetKind::Grid, 100.0),
];

/// Provision the demo neighborhood unless the registry is already
/// populated.
///
/// # Returns
///
/// - `Ok(true)` if the database was seeded
/// - `Ok(false)` if assets already existed and nothing was touched
pub async fn seed(db: &Db, now: DateTime, market: &MarketConfig) -> Result<bool, Error> {
    if !db.list_assets().await?.is_empty() {
        return Ok(false);
    }

    let mut assets = Vec::with_capacity(NEIGHBORHOOD.len());
    for &(name, kind, max_capacity_kw) in NEIGHBORHOOD {
        let asset = db
            .create_asset(
                AssetId::random(),
                name.to_owned(),
                kind,
                max_capacity_kw,
                market.starting_credit,
                now,
            )
            .await?;
        assets.push(asset);
    }

    // A week of hourly history gives the forecaster something to average.
    let mut rng = rand::rng();
    let week_ago = now.minus_days(7).hour_floor();
    let mut readings = Vec::new();
    for asset in &assets {
        for h in 0..(24 * 7) {
            let timestamp = week_ago.plus_hours(h);
            readings.push(ReadingRecord {
                asset_id: asset.id,
                timestamp,
                value_kw: sim::synthesize(
                    asset.kind,
                    asset.max_capacity_kw,
                    timestamp.hour_of_day(),
                    &mut rng,
                ),
            });
        }
    }
    db.record_readings(readings).await?;

    // Batteries are overnight-shiftable by default.
    for asset in assets.iter().filter(|a| a.kind == AssetKind::Battery) {
        db.upsert_profile(FlexibleLoadRecord {
            asset_id: asset.id,
            min_kw: -asset.max_capacity_kw,
            max_kw: asset.max_capacity_kw,
            is_shiftable: true,
            preferred_start_hour: 22,
            preferred_end_hour: 6,
        })
        .await?;
    }

    let points = db.generate_forecasts(now, 24).await?;
    let offers = db.generate_offers(now, market).await?;

    event!(
        Level::INFO,
        assets = assets.len(),
        points,
        offers,
        "seeded demo neighborhood"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mgx_core::ports::LedgerRepository as _;
    use mgx_sqlite::config::SqliteConfig;

    #[tokio::test]
    async fn seeding_is_idempotent() -> anyhow::Result<()> {
        let db = Db::open(&SqliteConfig::default()).await?;
        let now = DateTime::from(time::OffsetDateTime::now_utc());
        let market = MarketConfig::default();

        assert!(seed(&db, now, &market).await?);
        assert!(!seed(&db, now, &market).await?, "second run must be a no-op");

        let assets = db.list_assets().await?;
        assert_eq!(assets.len(), NEIGHBORHOOD.len());

        // Every asset gets a wallet at the starting credit.
        for asset in &assets {
            let wallet = db.get_wallet(asset.id).await?.unwrap();
            assert_eq!(wallet.balance, market.starting_credit);
        }

        // The forecast horizon and the first cycle's offers exist.
        assert_eq!(db.list_forecasts().await?.len(), 24 * NEIGHBORHOOD.len());
        assert!(!db.active_offers().await?.is_empty());

        Ok(())
    }
}
