use std::fs::File;

use jwt_simple::prelude::HS256Key;
use mgx_auction::DoubleAuction;
use mgx_axum::{router, start_server};
use mgx_core::ports::{CycleRepository as _, ForecastRepository as _, OfferRepository as _};
use mgx_sqlite::{Db, types::DateTime};
use mgxdemo::{AppConfig, Cli, impls::DemoApp, seed, sim};
use time::OffsetDateTime;
use tokio::select;
use tracing::{Level, event};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project. Subscribe so the events reach
    // stdio, filtered by RUST_LOG.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI args and extract the JWT key
    let cli = Cli::import()?;
    let key = HS256Key::from_bytes(cli.secret.as_bytes());

    // Create config with proper layering of CLI args
    let AppConfig {
        server,
        database,
        schedule,
        market,
        simulation,
    } = AppConfig::load(&cli)?;

    // Open database with config
    let db = Db::open(&database).await?;

    // Optionally provision the demo neighborhood on first run
    if cli.seed {
        seed::seed(&db, OffsetDateTime::now_utc().into(), &market).await?;
    }

    let db2 = db.clone();
    let app = DemoApp { db, key, market };

    // If requested, dump the schema and exit.
    if let Some(path) = cli.schema {
        let schema = router(app, server).1;
        serde_json::to_writer_pretty(File::create(path)?, &schema)?;
        return Ok(());
    }

    // We always run the server task.
    let server_task = tokio::spawn(async move { start_server(server, app).await });

    // However, we may or may not also run a scheduled cycle task
    if schedule.every.is_some() {
        let cycle_task = tokio::spawn(async move {
            let f = async move |now: OffsetDateTime| {
                tick(&db2, now.into(), &simulation, &market).await
            };
            schedule.schedule(f).await
        });

        select! {
            r = server_task => r??,
            r = cycle_task => r??,
        }
    } else {
        // Otherwise, we just run the server task to completion
        server_task.await??;
    }

    Ok(())
}

/// One scheduled tick = one full cycle: fresh readings, a rebuilt
/// horizon, the hour's offers, then matching + settlement.
async fn tick(
    db: &Db,
    stamp: DateTime,
    simulation: &mgxdemo::sim::SimConfig,
    market: &mgx_core::models::MarketConfig,
) -> anyhow::Result<()> {
    sim::step(db, stamp, simulation).await?;
    db.generate_forecasts(stamp, 24).await?;
    db.generate_offers(stamp, market).await?;
    let trades = db.run_cycle(stamp, DoubleAuction, market).await?;

    event!(Level::INFO, trades = trades.len(), "cycle settled");
    Ok(())
}
