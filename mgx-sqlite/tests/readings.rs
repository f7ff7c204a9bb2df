mod common;

use common::{add_asset, cycle_hour, open_db};
use mgx_core::{
    models::{AssetKind, ReadingRecord},
    ports::ReadingRepository as _,
};

/// Day stats separate production from consumption, cap the efficiency
/// score, and name the hungriest asset.
#[tokio::test]
async fn day_stats_aggregate_todays_readings() -> anyhow::Result<()> {
    let db = open_db().await?;
    let now = cycle_hour();

    let solar = add_asset(&db, "solar", AssetKind::Solar, 10.0).await?;
    let house = add_asset(&db, "house", AssetKind::Household, 5.0).await?;
    let pump = add_asset(&db, "pump", AssetKind::Household, 2.5).await?;

    db.record_readings(vec![
        ReadingRecord {
            asset_id: solar,
            timestamp: now,
            value_kw: 6.0,
        },
        ReadingRecord {
            asset_id: house,
            timestamp: now,
            value_kw: -3.0,
        },
        ReadingRecord {
            asset_id: pump,
            timestamp: now.plus_hours(1),
            value_kw: -1.0,
        },
        // Yesterday, must not count toward today's stats:
        ReadingRecord {
            asset_id: house,
            timestamp: now.minus_days(1),
            value_kw: -50.0,
        },
    ])
    .await?;

    let stats = db.day_stats(now.plus_hours(2)).await?;
    assert_eq!(stats.total_production_kwh, 6.0);
    assert_eq!(stats.total_consumption_kwh, 4.0);
    assert_eq!(stats.top_consumer, Some(house));
    assert_eq!(stats.efficiency_score, 100.0, "production exceeds demand");

    let recent = db.recent_readings(2).await?;
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].asset_id, pump, "newest first");

    Ok(())
}

/// With no consumption at all the efficiency score is pinned to 100.
#[tokio::test]
async fn efficiency_is_full_without_consumption() -> anyhow::Result<()> {
    let db = open_db().await?;
    let now = cycle_hour();

    let solar = add_asset(&db, "solar", AssetKind::Solar, 10.0).await?;
    db.record_readings(vec![ReadingRecord {
        asset_id: solar,
        timestamp: now,
        value_kw: 2.0,
    }])
    .await?;

    let stats = db.day_stats(now).await?;
    assert_eq!(stats.efficiency_score, 100.0);
    assert_eq!(stats.top_consumer, None);

    Ok(())
}
