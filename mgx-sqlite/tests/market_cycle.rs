mod common;

use common::{add_asset, cycle_hour, forecast, open_db};
use mgx_auction::DoubleAuction;
use mgx_core::{
    models::{AssetKind, MarketConfig},
    ports::{
        CycleRepository as _, ForecastRepository as _, LedgerRepository as _,
        OfferRepository as _, TradeRepository as _,
    },
};
use mgx_sqlite::Error;

/// The reference end-to-end scenario: A sells 5 kWh @ 0.15, B buys 2 kWh.
/// One internal trade settles, A is paid 0.30 by B, A's offer stays live
/// with 3 kWh, and B's offer is spent.
#[tokio::test]
async fn one_cycle_settles_and_balances() -> anyhow::Result<()> {
    let db = open_db().await?;
    let config = MarketConfig::default();
    let now = cycle_hour();

    let a = add_asset(&db, "solar a", AssetKind::Solar, 10.0).await?;
    let b = add_asset(&db, "house b", AssetKind::Household, 5.0).await?;
    add_asset(&db, "grid", AssetKind::Grid, 100.0).await?;

    db.store_forecasts(vec![forecast(a, now, 5.0), forecast(b, now, -2.0)])
        .await?;
    db.generate_offers(now, &config).await?;

    let trades = db.run_cycle(now, DoubleAuction, &config).await?;

    assert_eq!(trades.len(), 1);
    let trade = &trades[0];
    assert_eq!(trade.seller_asset_id, a);
    assert_eq!(trade.buyer_asset_id, b);
    assert_eq!(trade.traded_kwh, 2.0);
    assert_eq!(trade.price_per_kwh, 0.15);
    assert_eq!(trade.total_credits, 0.30);
    assert!(!trade.is_external);
    assert_eq!(trade.executed_at, now);

    // Zero-sum transfer: both wallets started at 100.
    let wallet_a = db.get_wallet(a).await?.unwrap();
    let wallet_b = db.get_wallet(b).await?.unwrap();
    assert_eq!(wallet_a.balance, 100.0 + trade.total_credits);
    assert_eq!(wallet_b.balance, 100.0 - trade.total_credits);
    assert_eq!(wallet_a.updated_at, now);

    // A keeps a live 3 kWh sell; B's buy is gone from the active book.
    let offers = db.active_offers().await?;
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].asset_id, a);
    assert_eq!(offers[0].quantity_kwh, 3.0);

    Ok(())
}

/// Demand with no internal counterparty settles in full against the grid:
/// one external trade, only the buyer wallet moves.
#[tokio::test]
async fn unmet_demand_falls_back_to_the_grid() -> anyhow::Result<()> {
    let db = open_db().await?;
    let config = MarketConfig::default();
    let now = cycle_hour();

    let b = add_asset(&db, "house b", AssetKind::Household, 5.0).await?;
    let grid = add_asset(&db, "grid", AssetKind::Grid, 100.0).await?;

    db.store_forecasts(vec![forecast(b, now, -4.0)]).await?;
    db.generate_offers(now, &config).await?;

    let trades = db.run_cycle(now, DoubleAuction, &config).await?;

    assert_eq!(trades.len(), 1);
    let trade = &trades[0];
    assert!(trade.is_external);
    assert_eq!(trade.seller_asset_id, grid);
    assert_eq!(trade.traded_kwh, 4.0);
    assert_eq!(trade.price_per_kwh, config.grid_price_per_kwh);

    let wallet_b = db.get_wallet(b).await?.unwrap();
    assert_eq!(wallet_b.balance, 100.0 - trade.total_credits);

    // The grid is a transaction party, not a ledger participant: its
    // wallet is untouched by external settlement.
    let wallet_grid = db.get_wallet(grid).await?.unwrap();
    assert_eq!(wallet_grid.balance, 100.0);

    assert!(db.active_offers().await?.is_empty());

    Ok(())
}

/// Wallets have no floor; a big enough grid purchase sends the buyer
/// negative rather than failing.
#[tokio::test]
async fn balances_may_go_negative() -> anyhow::Result<()> {
    let db = open_db().await?;
    let config = MarketConfig::default();
    let now = cycle_hour();

    let b = add_asset(&db, "hungry", AssetKind::Household, 600.0).await?;
    add_asset(&db, "grid", AssetKind::Grid, 1000.0).await?;

    db.store_forecasts(vec![forecast(b, now, -500.0)]).await?;
    db.generate_offers(now, &config).await?;
    db.run_cycle(now, DoubleAuction, &config).await?;

    let wallet = db.get_wallet(b).await?.unwrap();
    assert!(wallet.balance < 0.0);

    Ok(())
}

/// A cycle with no grid asset is a configuration fault and settles
/// nothing.
#[tokio::test]
async fn missing_grid_asset_aborts_the_cycle() -> anyhow::Result<()> {
    let db = open_db().await?;
    let config = MarketConfig::default();
    let now = cycle_hour();

    let b = add_asset(&db, "house b", AssetKind::Household, 5.0).await?;
    db.store_forecasts(vec![forecast(b, now, -2.0)]).await?;
    db.generate_offers(now, &config).await?;

    let err = db.run_cycle(now, DoubleAuction, &config).await.unwrap_err();
    assert!(matches!(err, Error::MissingGridAsset));

    // Nothing committed: the buy offer is still live and unspent.
    let offers = db.active_offers().await?;
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].quantity_kwh, 2.0);
    assert!(db.trade_history(10).await?.is_empty());

    Ok(())
}

/// A missing wallet mid-pass rolls the whole cycle back: no trades, no
/// one-sided wallet mutations, offers untouched.
#[tokio::test]
async fn missing_wallet_rolls_the_pass_back() -> anyhow::Result<()> {
    let db = open_db().await?;
    let config = MarketConfig::default();
    let now = cycle_hour();

    let a = add_asset(&db, "solar a", AssetKind::Solar, 10.0).await?;
    let b = add_asset(&db, "house b", AssetKind::Household, 5.0).await?;
    add_asset(&db, "grid", AssetKind::Grid, 100.0).await?;

    db.store_forecasts(vec![forecast(a, now, 5.0), forecast(b, now, -2.0)])
        .await?;
    db.generate_offers(now, &config).await?;

    // Sabotage the provisioning invariant behind the repository's back.
    sqlx::query("delete from wallet where asset_id = $1")
        .bind(b)
        .execute(&db.writer)
        .await?;

    let err = db.run_cycle(now, DoubleAuction, &config).await.unwrap_err();
    assert!(matches!(err, Error::MissingWallet(asset) if asset == b));

    // The seller was never paid and the book did not move.
    assert_eq!(db.get_wallet(a).await?.unwrap().balance, 100.0);
    assert_eq!(db.active_offers().await?.len(), 2);
    assert!(db.trade_history(10).await?.is_empty());

    Ok(())
}

/// Summary math: grid dependency stays in [0, 100], is 0 with no trades,
/// and the average price is the simple per-trade mean of internal fills.
#[tokio::test]
async fn market_summary_aggregates_the_day() -> anyhow::Result<()> {
    let db = open_db().await?;
    let config = MarketConfig::default();
    let now = cycle_hour();

    let empty = db.market_summary(now).await?;
    assert_eq!(empty.total_internal_kwh, 0.0);
    assert_eq!(empty.average_price_per_kwh, 0.0);
    assert_eq!(empty.grid_dependency_pct, 0.0);

    let a = add_asset(&db, "solar a", AssetKind::Solar, 10.0).await?;
    let b = add_asset(&db, "house b", AssetKind::Household, 10.0).await?;
    add_asset(&db, "grid", AssetKind::Grid, 100.0).await?;

    // 2 kWh internal (from A), 6 kWh external (grid fallback).
    db.store_forecasts(vec![forecast(a, now, 2.0), forecast(b, now, -8.0)])
        .await?;
    db.generate_offers(now, &config).await?;
    db.run_cycle(now, DoubleAuction, &config).await?;

    let summary = db.market_summary(now).await?;
    assert_eq!(summary.total_internal_kwh, 2.0);
    assert_eq!(summary.average_price_per_kwh, config.sell_price_per_kwh);
    assert_eq!(summary.grid_dependency_pct, 75.0);
    assert!(summary.grid_dependency_pct >= 0.0 && summary.grid_dependency_pct <= 100.0);

    let history = db.trade_history(10).await?;
    assert_eq!(history.len(), 2);

    Ok(())
}
