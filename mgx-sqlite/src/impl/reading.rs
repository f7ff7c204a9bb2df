use crate::{
    Db, Error,
    types::{AssetId, DateTime, ReadingRow},
};
use mgx_core::{
    models::{DayStats, ReadingRecord},
    ports::ReadingRepository,
};

impl ReadingRepository for Db {
    async fn record_readings(
        &self,
        readings: Vec<ReadingRecord<AssetId, DateTime>>,
    ) -> Result<(), Error> {
        let mut tx = self.writer.begin().await?;

        for reading in readings {
            sqlx::query("insert into reading (asset_id, timestamp, value_kw) values ($1, $2, $3)")
                .bind(reading.asset_id)
                .bind(reading.timestamp)
                .bind(reading.value_kw)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn recent_readings(
        &self,
        limit: usize,
    ) -> Result<Vec<ReadingRecord<AssetId, DateTime>>, Error> {
        let rows: Vec<ReadingRow> = sqlx::query_as(
            r#"
            select
                asset_id, timestamp, value_kw
            from
                reading
            order by
                timestamp desc, id desc
            limit
                $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn day_stats(&self, as_of: DateTime) -> Result<DayStats<AssetId>, Error> {
        let midnight = as_of.start_of_day();

        let (production, consumption): (f64, f64) = sqlx::query_as(
            r#"
            select
                coalesce(sum(case when value_kw > 0 then value_kw end), 0.0),
                coalesce(sum(case when value_kw < 0 then -value_kw end), 0.0)
            from
                reading
            where
                timestamp >= $1
            "#,
        )
        .bind(midnight)
        .fetch_one(&self.reader)
        .await?;

        let top_consumer: Option<AssetId> = sqlx::query_scalar(
            r#"
            select
                asset_id
            from
                reading
            where
                timestamp >= $1 and value_kw < 0
            group by
                asset_id
            order by
                sum(-value_kw) desc
            limit
                1
            "#,
        )
        .bind(midnight)
        .fetch_optional(&self.reader)
        .await?;

        let efficiency_score = if consumption == 0.0 {
            100.0
        } else {
            (production / consumption * 100.0).min(100.0)
        };

        Ok(DayStats {
            total_production_kwh: production,
            total_consumption_kwh: consumption,
            efficiency_score,
            top_consumer,
        })
    }
}
