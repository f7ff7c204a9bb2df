use crate::{
    Db, Error,
    types::{AssetId, DateTime, OfferRow, TradeId, TradeRow},
};
use mgx_core::{
    models::{MarketConfig, MarketSummary, OfferBook, TradeRecord},
    ports::{Auctioneer, CycleRepository, TradeRepository},
};
use tracing::{Level, event};

impl<T> CycleRepository<T> for Db
where
    T: Auctioneer<crate::types::OfferId, AssetId, DateTime> + Send,
{
    /// One cycle is one transaction. The active book is checked out, the
    /// auctioneer clears it in memory, and the mutated offers, the trades,
    /// and every wallet leg land together, or, on any error, not at all.
    /// The single-connection writer pool additionally serializes passes
    /// against each other and against every other write.
    async fn run_cycle(
        &self,
        timestamp: DateTime,
        auctioneer: T,
        config: &MarketConfig,
    ) -> Result<Vec<TradeRecord<TradeId, AssetId, DateTime>>, Error> {
        let mut tx = self.writer.begin().await?;

        // The grid asset must be provisioned before trading begins; a
        // missing counterparty is a configuration fault, not a soft skip.
        let grid_asset: Option<AssetId> =
            sqlx::query_scalar("select id from asset where kind = 'grid' limit 1")
                .fetch_optional(&mut *tx)
                .await?;
        let grid_asset = grid_asset.ok_or(Error::MissingGridAsset)?;

        let rows: Vec<OfferRow> = sqlx::query_as(
            r#"
            select
                id, asset_id, side, quantity_kwh, price_per_kwh, created_at, is_active
            from
                offer
            where
                is_active = 1
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let entries = rows
            .into_iter()
            .map(OfferRow::into_entry)
            .collect::<Result<Vec<_>, Error>>()?;
        let mut book = OfferBook::new(entries);

        let fills = auctioneer.clear(&mut book, &grid_asset, config);

        let mut trades = Vec::with_capacity(fills.len());
        for fill in fills {
            let total_credits = fill.total_credits();
            let trade_id = TradeId::random();

            sqlx::query(
                r#"
                insert into
                    trade (id, seller_asset_id, buyer_asset_id, traded_kwh,
                           price_per_kwh, total_credits, executed_at, is_external)
                values
                    ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(trade_id)
            .bind(fill.seller_asset_id)
            .bind(fill.buyer_asset_id)
            .bind(fill.traded_kwh)
            .bind(fill.price_per_kwh)
            .bind(total_credits)
            .bind(timestamp)
            .bind(fill.is_external)
            .execute(&mut *tx)
            .await?;

            // The buyer pays on every fill; the seller is credited only on
            // internal fills, since the grid holds no wallet. Returning an
            // error here drops the transaction and rolls the whole pass
            // back, so a missing wallet can never leave a one-sided
            // transfer behind.
            let debited = sqlx::query(
                "update wallet set balance = balance - $1, updated_at = $2 where asset_id = $3",
            )
            .bind(total_credits)
            .bind(timestamp)
            .bind(fill.buyer_asset_id)
            .execute(&mut *tx)
            .await?;
            if debited.rows_affected() == 0 {
                return Err(Error::MissingWallet(fill.buyer_asset_id));
            }

            if !fill.is_external {
                let credited = sqlx::query(
                    "update wallet set balance = balance + $1, updated_at = $2 where asset_id = $3",
                )
                .bind(total_credits)
                .bind(timestamp)
                .bind(fill.seller_asset_id)
                .execute(&mut *tx)
                .await?;
                if credited.rows_affected() == 0 {
                    return Err(Error::MissingWallet(fill.seller_asset_id));
                }
            }

            trades.push(TradeRecord {
                id: trade_id,
                seller_asset_id: fill.seller_asset_id,
                buyer_asset_id: fill.buyer_asset_id,
                traded_kwh: fill.traded_kwh,
                price_per_kwh: fill.price_per_kwh,
                total_credits,
                executed_at: timestamp,
                is_external: fill.is_external,
            });
        }

        // Commit the mutated book: remaining quantities and activity flags.
        for entry in &book.entries {
            sqlx::query("update offer set quantity_kwh = $1, is_active = $2 where id = $3")
                .bind(entry.remaining_kwh)
                .bind(entry.is_active)
                .bind(entry.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        event!(
            Level::INFO,
            cycle = %timestamp,
            trades = trades.len(),
            external = trades.iter().filter(|t| t.is_external).count(),
            "trading cycle settled"
        );

        Ok(trades)
    }
}

impl TradeRepository for Db {
    async fn trade_history(
        &self,
        limit: usize,
    ) -> Result<Vec<TradeRecord<TradeId, AssetId, DateTime>>, Error> {
        let rows: Vec<TradeRow> = sqlx::query_as(
            r#"
            select
                id, seller_asset_id, buyer_asset_id, traded_kwh,
                price_per_kwh, total_credits, executed_at, is_external
            from
                trade
            order by
                executed_at desc, rowid desc
            limit
                $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn market_summary(&self, as_of: DateTime) -> Result<MarketSummary, Error> {
        let (internal_kwh, average_price, external_kwh): (f64, f64, f64) = sqlx::query_as(
            r#"
            select
                coalesce(sum(case when is_external = 0 then traded_kwh end), 0.0),
                coalesce(avg(case when is_external = 0 then price_per_kwh end), 0.0),
                coalesce(sum(case when is_external = 1 then traded_kwh end), 0.0)
            from
                trade
            where
                executed_at >= $1
            "#,
        )
        .bind(as_of.start_of_day())
        .fetch_one(&self.reader)
        .await?;

        let total_kwh = internal_kwh + external_kwh;
        let grid_dependency_pct = if total_kwh > 0.0 {
            external_kwh / total_kwh * 100.0
        } else {
            0.0
        };

        Ok(MarketSummary {
            total_internal_kwh: internal_kwh,
            average_price_per_kwh: average_price,
            grid_dependency_pct,
        })
    }
}
