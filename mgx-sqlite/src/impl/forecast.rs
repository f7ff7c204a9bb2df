use crate::{
    Db, Error,
    types::{AssetId, DateTime, ForecastRow},
};
use mgx_core::{
    models::{Confidence, ForecastRecord, ForecastSummary, SurplusWindow},
    ports::ForecastRepository,
};
use std::collections::HashMap;
use tracing::{Level, event};

/// Estimate one hour from same-hour-of-day samples.
fn estimate(samples: Option<&(f64, u32)>) -> (f64, Confidence) {
    match samples {
        None | Some(&(_, 0)) => (0.0, Confidence::Low),
        Some(&(sum, count)) if count > 5 => (sum / count as f64, Confidence::High),
        Some(&(sum, count)) => (sum / count as f64, Confidence::Medium),
    }
}

impl ForecastRepository for Db {
    async fn generate_forecasts(&self, start: DateTime, hours: u32) -> Result<usize, Error> {
        // Forecast points land on an hour-aligned grid so offer generation
        // can bucket them.
        let start = start.hour_floor();
        let window_start = start.minus_days(7);

        let assets: Vec<AssetId> = sqlx::query_scalar("select id from asset order by name")
            .fetch_all(&self.reader)
            .await?;

        let samples: Vec<(AssetId, DateTime, f64)> = sqlx::query_as(
            r#"
            select
                asset_id, timestamp, value_kw
            from
                reading
            where
                timestamp >= $1 and timestamp < $2
            "#,
        )
        .bind(window_start)
        .bind(start)
        .fetch_all(&self.reader)
        .await?;

        // Bucket the history by (asset, hour of day) once, then read the
        // buckets for every forecast hour.
        let mut buckets: HashMap<(AssetId, u8), (f64, u32)> = HashMap::new();
        for (asset_id, timestamp, value_kw) in samples {
            let bucket = buckets.entry((asset_id, timestamp.hour_of_day())).or_default();
            bucket.0 += value_kw;
            bucket.1 += 1;
        }

        let mut tx = self.writer.begin().await?;

        // The horizon is rebuilt wholesale; stale points must not linger.
        sqlx::query("delete from forecast").execute(&mut *tx).await?;

        let mut written = 0;
        for asset_id in &assets {
            for h in 0..hours {
                let hour = start.plus_hours(h as i64);
                let (expected_kw, confidence) =
                    estimate(buckets.get(&(*asset_id, hour.hour_of_day())));

                sqlx::query(
                    r#"
                    insert into
                        forecast (asset_id, hour, expected_kw, confidence)
                    values
                        ($1, $2, $3, $4)
                    "#,
                )
                .bind(*asset_id)
                .bind(hour)
                .bind(expected_kw)
                .bind(confidence.as_str())
                .execute(&mut *tx)
                .await?;
                written += 1;
            }
        }

        tx.commit().await?;

        event!(Level::INFO, points = written, assets = assets.len(), "rebuilt forecast horizon");
        Ok(written)
    }

    async fn store_forecasts(
        &self,
        points: Vec<ForecastRecord<AssetId, DateTime>>,
    ) -> Result<(), Error> {
        let mut tx = self.writer.begin().await?;

        sqlx::query("delete from forecast").execute(&mut *tx).await?;

        for point in points {
            sqlx::query(
                r#"
                insert into
                    forecast (asset_id, hour, expected_kw, confidence)
                values
                    ($1, $2, $3, $4)
                "#,
            )
            .bind(point.asset_id)
            .bind(point.hour)
            .bind(point.expected_kw)
            .bind(point.confidence.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_forecasts(&self) -> Result<Vec<ForecastRecord<AssetId, DateTime>>, Error> {
        let rows: Vec<ForecastRow> = sqlx::query_as(
            r#"
            select
                asset_id, hour, expected_kw, confidence
            from
                forecast
            order by
                hour, asset_id
            "#,
        )
        .fetch_all(&self.reader)
        .await?;

        rows.into_iter().map(ForecastRow::into_record).collect()
    }

    async fn forecast_summary(&self) -> Result<Vec<ForecastSummary<DateTime>>, Error> {
        let rows: Vec<(DateTime, f64, f64)> = sqlx::query_as(
            r#"
            select
                hour,
                coalesce(sum(case when expected_kw > 0 then expected_kw end), 0.0),
                coalesce(sum(case when expected_kw < 0 then expected_kw end), 0.0)
            from
                forecast
            group by
                hour
            order by
                hour
            "#,
        )
        .fetch_all(&self.reader)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(hour, production, consumption)| ForecastSummary {
                hour,
                total_production_kw: production,
                total_consumption_kw: consumption,
            })
            .collect())
    }

    async fn surplus_windows(&self) -> Result<Vec<SurplusWindow<DateTime>>, Error> {
        struct Run {
            from: DateTime,
            last: DateTime,
            total: f64,
            surplus: bool,
        }

        let mut windows = Vec::new();
        let mut current: Option<Run> = None;

        for summary in self.forecast_summary().await? {
            let net = summary.net_balance_kw();
            let surplus = net > 0.0;

            match current.as_mut() {
                Some(run) if run.surplus == surplus => {
                    run.last = summary.hour;
                    run.total += net;
                }
                _ => {
                    if let Some(run) = current.take() {
                        windows.push(SurplusWindow {
                            from: run.from,
                            thru: run.last.plus_hours(1),
                            total_net_kw: run.total,
                        });
                    }
                    current = Some(Run {
                        from: summary.hour,
                        last: summary.hour,
                        total: net,
                        surplus,
                    });
                }
            }
        }

        if let Some(run) = current {
            windows.push(SurplusWindow {
                from: run.from,
                thru: run.last.plus_hours(1),
                total_net_kw: run.total,
            });
        }

        Ok(windows)
    }
}
