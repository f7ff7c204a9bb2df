mod common;

use common::{add_asset, cycle_hour, forecast, open_db};
use mgx_core::{
    models::{AssetKind, MarketConfig, OfferSide},
    ports::{ForecastRepository as _, OfferRepository as _},
};

/// Surplus forecasts become sell offers, deficits become buy offers, and
/// zero forecasts and the grid asset produce nothing.
#[tokio::test]
async fn offers_derive_from_the_forecast_window() -> anyhow::Result<()> {
    let db = open_db().await?;
    let config = MarketConfig::default();
    let now = cycle_hour();

    let solar = add_asset(&db, "solar", AssetKind::Solar, 10.0).await?;
    let house = add_asset(&db, "house", AssetKind::Household, 5.0).await?;
    let idle = add_asset(&db, "idle", AssetKind::Battery, 11.0).await?;
    let grid = add_asset(&db, "grid", AssetKind::Grid, 100.0).await?;

    db.store_forecasts(vec![
        forecast(solar, now, 4.0),
        forecast(house, now, -2.5),
        forecast(idle, now, 0.0),
        forecast(grid, now, 12.0),
        // Outside the cycle hour, must be ignored:
        forecast(solar, now.plus_hours(1), 9.0),
    ])
    .await?;

    let created = db.generate_offers(now, &config).await?;
    assert_eq!(created, 2);

    let offers = db.active_offers().await?;
    assert_eq!(offers.len(), 2);

    let sell = offers.iter().find(|o| o.side == OfferSide::Sell).unwrap();
    assert_eq!(sell.asset_id, solar);
    assert_eq!(sell.quantity_kwh, 4.0);
    assert_eq!(sell.price_per_kwh, config.sell_price_per_kwh);
    assert_eq!(sell.created_at, now);
    assert!(sell.is_active);

    let buy = offers.iter().find(|o| o.side == OfferSide::Buy).unwrap();
    assert_eq!(buy.asset_id, house);
    assert_eq!(buy.quantity_kwh, 2.5, "buy quantity is the deficit magnitude");
    assert_eq!(buy.price_per_kwh, config.buy_price_per_kwh);

    Ok(())
}

/// Generation starts with a global deactivation sweep, so re-running it
/// replaces the book instead of stacking offers.
#[tokio::test]
async fn regeneration_replaces_the_active_book() -> anyhow::Result<()> {
    let db = open_db().await?;
    let config = MarketConfig::default();
    let now = cycle_hour();

    let solar = add_asset(&db, "solar", AssetKind::Solar, 10.0).await?;
    db.store_forecasts(vec![forecast(solar, now, 4.0)]).await?;

    db.generate_offers(now, &config).await?;
    db.generate_offers(now, &config).await?;

    let offers = db.active_offers().await?;
    assert_eq!(offers.len(), 1, "only the latest cycle's offer is live");

    // The next hour has no forecast for this asset: the sweep still
    // retires the previous offer and nothing replaces it.
    let created = db.generate_offers(now.plus_hours(1), &config).await?;
    assert_eq!(created, 0);
    assert!(db.active_offers().await?.is_empty());

    Ok(())
}
