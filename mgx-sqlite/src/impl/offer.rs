use crate::{
    Db, Error,
    types::{AssetId, DateTime, OfferId, OfferRow},
};
use mgx_core::{
    models::{MarketConfig, OfferRecord, OfferSide},
    ports::OfferRepository,
};
use tracing::{Level, event};

impl OfferRepository for Db {
    async fn generate_offers(
        &self,
        timestamp: DateTime,
        config: &MarketConfig,
    ) -> Result<usize, Error> {
        // The cycle is identified by the hour bucket containing the
        // timestamp, so callers may pass raw wall-clock times.
        let cycle = timestamp.hour_floor();

        let mut tx = self.writer.begin().await?;

        // The sweep is global: every live offer goes, not just the offers
        // of assets with fresh forecasts. This must happen before the
        // inserts so no asset ever has two overlapping live offers.
        sqlx::query("update offer set is_active = 0 where is_active = 1")
            .execute(&mut *tx)
            .await?;

        let thru = cycle.plus_hours(1);
        let forecasts: Vec<(AssetId, f64)> = sqlx::query_as(
            r#"
            select
                f.asset_id, f.expected_kw
            from
                forecast f
            join
                asset a on a.id = f.asset_id
            where
                f.hour >= $1 and f.hour < $2 and a.kind <> 'grid'
            order by
                f.asset_id
            "#,
        )
        .bind(cycle)
        .bind(thru)
        .fetch_all(&mut *tx)
        .await?;

        let mut created = 0;
        for (asset_id, expected_kw) in forecasts {
            let (side, quantity_kwh, price_per_kwh) = if expected_kw > 0.0 {
                (OfferSide::Sell, expected_kw, config.sell_price_per_kwh)
            } else if expected_kw < 0.0 {
                (OfferSide::Buy, -expected_kw, config.buy_price_per_kwh)
            } else {
                continue;
            };

            sqlx::query(
                r#"
                insert into
                    offer (id, asset_id, side, quantity_kwh, price_per_kwh, created_at, is_active)
                values
                    ($1, $2, $3, $4, $5, $6, 1)
                "#,
            )
            .bind(OfferId::random())
            .bind(asset_id)
            .bind(side.as_str())
            .bind(quantity_kwh)
            .bind(price_per_kwh)
            .bind(cycle)
            .execute(&mut *tx)
            .await?;
            created += 1;
        }

        tx.commit().await?;

        event!(Level::INFO, created, cycle = %cycle, "generated offers");
        Ok(created)
    }

    async fn active_offers(&self) -> Result<Vec<OfferRecord<OfferId, AssetId, DateTime>>, Error> {
        let rows: Vec<OfferRow> = sqlx::query_as(
            r#"
            select
                id, asset_id, side, quantity_kwh, price_per_kwh, created_at, is_active
            from
                offer
            where
                is_active = 1
            order by
                created_at, id
            "#,
        )
        .fetch_all(&self.reader)
        .await?;

        rows.into_iter().map(OfferRow::into_record).collect()
    }
}
