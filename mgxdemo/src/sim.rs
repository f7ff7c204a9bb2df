//! Synthetic meter readings for the demo neighborhood.
//!
//! Each tick produces one plausible net-power sample per active asset:
//! solar follows a daylight bell, wind is choppy, households draw a
//! base-plus-peak load, batteries wander. The load-shifting behavior is
//! controlled by an explicit [`SimConfig`] passed into every call rather
//! than any shared toggle, so two callers can never observe different
//! simulation modes for the same tick.

use mgx_core::{
    models::{AssetKind, ReadingRecord},
    ports::{
        AssetRepository as _, FlexibleLoadRepository as _, ForecastRepository as _,
        ReadingRepository as _,
    },
};
use mgx_sqlite::{
    Db, Error,
    types::{AssetId, DateTime},
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::PI;
use tracing::{Level, event};

/// Configuration for the readings simulator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Whether the scheduler synthesizes readings at all
    pub enabled: bool,
    /// Whether shiftable loads charge during the forecast surplus window
    /// instead of following their usual pattern
    pub optimize_flexible_loads: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            optimize_flexible_loads: false,
        }
    }
}

/// One plausible net-power value for an asset of `kind` at `hour`.
pub(crate) fn synthesize(
    kind: AssetKind,
    max_capacity_kw: f64,
    hour: u8,
    rng: &mut impl Rng,
) -> f64 {
    match kind {
        AssetKind::Solar => {
            // Daylight only, peaking at noon.
            if hour > 6 && hour < 18 {
                let peak_factor = ((hour - 6) as f64 * PI / 12.0).sin();
                max_capacity_kw * peak_factor * (0.8 + rng.random::<f64>() * 0.4)
            } else {
                0.0
            }
        }
        AssetKind::Wind => max_capacity_kw * (0.2 + rng.random::<f64>() * 0.6),
        AssetKind::Household => {
            // Morning and evening peaks over a small base load.
            let base_load = if (7..=9).contains(&hour) || (18..=22).contains(&hour) {
                0.8
            } else {
                0.2
            };
            -max_capacity_kw * (base_load + rng.random::<f64>() * 0.2)
        }
        AssetKind::Battery => (rng.random::<f64>() - 0.5) * max_capacity_kw,
        AssetKind::Grid => (rng.random::<f64>() - 0.5) * 20.0,
    }
}

/// Record one synthetic reading per active asset.
///
/// With `optimize_flexible_loads` set, assets that have a shiftable profile
/// charge hard during the best forecast surplus window and sit idle
/// otherwise, instead of wandering.
///
/// # Returns
///
/// The number of readings recorded (0 when the simulator is disabled).
pub async fn step(db: &Db, now: DateTime, config: &SimConfig) -> Result<usize, Error> {
    if !config.enabled {
        return Ok(0);
    }

    let assets = db.list_assets().await?;
    let hour = now.hour_of_day();

    let shiftable: HashMap<AssetId, f64> = if config.optimize_flexible_loads {
        db.list_profiles()
            .await?
            .into_iter()
            .filter(|p| p.is_shiftable)
            .map(|p| (p.asset_id, p.max_kw))
            .collect()
    } else {
        HashMap::new()
    };

    let surplus_hours: Option<(u8, u8)> = if shiftable.is_empty() {
        None
    } else {
        db.surplus_windows()
            .await?
            .into_iter()
            .filter(|w| w.is_surplus())
            .max_by(|a, b| a.total_net_kw.total_cmp(&b.total_net_kw))
            .map(|w| (w.from.hour_of_day(), w.thru.hour_of_day()))
    };

    let readings = {
        let mut rng = rand::rng();
        let mut readings = Vec::new();
        for asset in assets.into_iter().filter(|a| a.is_active) {
            let value_kw = match (shiftable.get(&asset.id), surplus_hours) {
                (Some(&max_kw), Some((from, thru))) => {
                    // Half-open window; may wrap past midnight.
                    let in_window = if from <= thru {
                        (from..thru).contains(&hour)
                    } else {
                        hour >= from || hour < thru
                    };
                    if in_window { -max_kw.abs() * 0.8 } else { 0.0 }
                }
                _ => synthesize(asset.kind, asset.max_capacity_kw, hour, &mut rng),
            };

            readings.push(ReadingRecord {
                asset_id: asset.id,
                timestamp: now,
                value_kw,
            });
        }
        readings
    };

    let count = readings.len();
    db.record_readings(readings).await?;
    event!(Level::DEBUG, count, hour, "simulated readings");
    Ok(count)
}
