mod common;

use common::{add_asset, cycle_hour, open_db};
use mgx_core::{
    models::{AssetKind, Confidence, ReadingRecord},
    ports::{ForecastRepository as _, ReadingRepository as _},
};

/// Forecasts are hour-of-day averages over the trailing week: more than
/// five samples is High confidence, at least one is Medium, none is Low
/// with an expectation of zero.
#[tokio::test]
async fn horizon_averages_the_trailing_week() -> anyhow::Result<()> {
    let db = open_db().await?;
    let start = cycle_hour().start_of_day();

    let battery = add_asset(&db, "battery", AssetKind::Battery, 11.0).await?;

    let mut readings = Vec::new();
    for day in 1..=7 {
        // Seven samples at 06:00, surplus:
        readings.push(ReadingRecord {
            asset_id: battery,
            timestamp: start.minus_days(day).plus_hours(6),
            value_kw: 6.0,
        });
    }
    for day in 1..=3 {
        // Three samples at 12:00, deficit:
        readings.push(ReadingRecord {
            asset_id: battery,
            timestamp: start.minus_days(day).plus_hours(12),
            value_kw: -2.0,
        });
    }
    db.record_readings(readings).await?;

    let written = db.generate_forecasts(start, 24).await?;
    assert_eq!(written, 24);

    let forecasts = db.list_forecasts().await?;
    assert_eq!(forecasts.len(), 24);

    let at = |h: i64| {
        forecasts
            .iter()
            .find(|f| f.hour == start.plus_hours(h))
            .unwrap()
    };

    assert_eq!(at(6).expected_kw, 6.0);
    assert_eq!(at(6).confidence, Confidence::High);

    assert_eq!(at(12).expected_kw, -2.0);
    assert_eq!(at(12).confidence, Confidence::Medium);

    assert_eq!(at(1).expected_kw, 0.0);
    assert_eq!(at(1).confidence, Confidence::Low);

    // Regeneration replaces the horizon rather than appending to it.
    db.generate_forecasts(start, 24).await?;
    assert_eq!(db.list_forecasts().await?.len(), 24);

    Ok(())
}

/// Contiguous same-signed hours collapse into windows; the surplus window
/// carries its summed net balance.
#[tokio::test]
async fn windows_partition_the_horizon_by_sign() -> anyhow::Result<()> {
    let db = open_db().await?;
    let start = cycle_hour().start_of_day();

    let battery = add_asset(&db, "battery", AssetKind::Battery, 11.0).await?;

    let mut readings = Vec::new();
    for day in 1..=7 {
        readings.push(ReadingRecord {
            asset_id: battery,
            timestamp: start.minus_days(day).plus_hours(6),
            value_kw: 6.0,
        });
        readings.push(ReadingRecord {
            asset_id: battery,
            timestamp: start.minus_days(day).plus_hours(12),
            value_kw: -2.0,
        });
    }
    db.record_readings(readings).await?;
    db.generate_forecasts(start, 24).await?;

    let windows = db.surplus_windows().await?;
    // Zero hours count as deficit, so the horizon splits into
    // [0,6) deficit, [6,7) surplus, [7,24) deficit.
    assert_eq!(windows.len(), 3);

    let surplus = &windows[1];
    assert!(surplus.is_surplus());
    assert_eq!(surplus.from, start.plus_hours(6));
    assert_eq!(surplus.thru, start.plus_hours(7));
    assert_eq!(surplus.total_net_kw, 6.0);

    assert!(!windows[0].is_surplus());
    assert!(!windows[2].is_surplus());

    Ok(())
}
