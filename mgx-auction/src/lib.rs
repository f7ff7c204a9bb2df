#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use mgx_core::{
    models::{MarketConfig, OfferBook, OfferSide, Trade},
    ports::Auctioneer,
};
use tracing::{Level, event};

/// The reference double-auction implementation.
///
/// Matching follows price-time priority on both sides of the book: sell
/// offers are taken cheapest-first, buy offers most-willing-first, and ties
/// on price are broken by earlier creation time. Each fill settles at the
/// *seller's* posted price. After internal matching, any buy offer with
/// remaining demand is settled in full against the grid asset at the
/// configured fallback price, so the pass always ends with every buyer
/// cleared.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleAuction;

impl<O, A, D> Auctioneer<O, A, D> for DoubleAuction
where
    A: PartialEq + Clone,
    D: Ord,
{
    fn clear(
        &self,
        book: &mut OfferBook<O, A, D>,
        grid_asset: &A,
        config: &MarketConfig,
    ) -> Vec<Trade<A>> {
        let entries = &mut book.entries;

        // Index the two sides of the book in priority order. Sorting
        // indices instead of entries keeps the storage order of the book
        // intact for the commit step.
        let mut sells: Vec<usize> = (0..entries.len())
            .filter(|&i| entries[i].is_active && entries[i].side == OfferSide::Sell)
            .collect();
        sells.sort_by(|&a, &b| {
            entries[a]
                .price_per_kwh
                .total_cmp(&entries[b].price_per_kwh)
                .then_with(|| entries[a].created_at.cmp(&entries[b].created_at))
        });

        let mut buys: Vec<usize> = (0..entries.len())
            .filter(|&i| entries[i].is_active && entries[i].side == OfferSide::Buy)
            .collect();
        buys.sort_by(|&a, &b| {
            entries[b]
                .price_per_kwh
                .total_cmp(&entries[a].price_per_kwh)
                .then_with(|| entries[a].created_at.cmp(&entries[b].created_at))
        });

        let mut trades = Vec::new();

        // Internal pass: each buyer sweeps the sell side in priority order,
        // possibly sourcing from several sellers.
        for &b in &buys {
            let buyer_asset = entries[b].asset_id.clone();

            for &s in &sells {
                if entries[b].remaining_kwh <= 0.0 {
                    break;
                }

                let seller = &entries[s];
                // An offer never trades with another offer of its own
                // asset, and a depleted seller is skipped rather than
                // removed.
                if seller.asset_id == buyer_asset || seller.remaining_kwh <= 0.0 {
                    continue;
                }

                let traded_kwh = entries[b].remaining_kwh.min(seller.remaining_kwh);
                let price_per_kwh = seller.price_per_kwh;

                trades.push(Trade {
                    seller_asset_id: seller.asset_id.clone(),
                    buyer_asset_id: buyer_asset.clone(),
                    traded_kwh,
                    price_per_kwh,
                    is_external: false,
                });

                let seller = &mut entries[s];
                seller.remaining_kwh -= traded_kwh;
                if seller.remaining_kwh <= 0.0 {
                    seller.is_active = false;
                }

                let buyer = &mut entries[b];
                buyer.remaining_kwh -= traded_kwh;
                if buyer.remaining_kwh <= 0.0 {
                    buyer.is_active = false;
                }
            }
        }

        let internal_fills = trades.len();

        // Fallback pass: whatever demand the internal market could not
        // cover is bought from the grid, in full, at the fallback price.
        for &b in &buys {
            let buyer = &mut entries[b];
            if buyer.is_active && buyer.remaining_kwh > 0.0 {
                trades.push(Trade {
                    seller_asset_id: grid_asset.clone(),
                    buyer_asset_id: buyer.asset_id.clone(),
                    traded_kwh: buyer.remaining_kwh,
                    price_per_kwh: config.grid_price_per_kwh,
                    is_external: true,
                });
                buyer.remaining_kwh = 0.0;
                buyer.is_active = false;
            }
        }

        event!(
            Level::DEBUG,
            buys = buys.len(),
            sells = sells.len(),
            internal_fills,
            external_fills = trades.len() - internal_fills,
            "cleared offer book"
        );

        trades
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mgx_core::models::BookEntry;

    fn entry(
        id: u32,
        asset: &'static str,
        side: OfferSide,
        kwh: f64,
        price: f64,
        created_at: i64,
    ) -> BookEntry<u32, &'static str, i64> {
        BookEntry {
            id,
            asset_id: asset,
            side,
            remaining_kwh: kwh,
            price_per_kwh: price,
            created_at,
            is_active: true,
        }
    }

    #[test]
    fn empty_book_produces_no_trades() {
        let mut book: OfferBook<u32, &str, i64> = OfferBook::new(vec![]);
        let trades = DoubleAuction.clear(&mut book, &"grid", &MarketConfig::default());
        assert!(trades.is_empty());
    }

    #[test]
    fn inactive_offers_are_ignored() {
        let mut sell = entry(1, "a", OfferSide::Sell, 5.0, 0.10, 0);
        sell.is_active = false;
        let buy = entry(2, "b", OfferSide::Buy, 2.0, 0.25, 0);
        let mut book = OfferBook::new(vec![sell, buy]);

        let trades = DoubleAuction.clear(&mut book, &"grid", &MarketConfig::default());

        // The frozen sell must not be touched; the buyer goes to the grid.
        assert_eq!(trades.len(), 1);
        assert!(trades[0].is_external);
        assert_eq!(book.entries[0].remaining_kwh, 5.0);
    }

    #[test]
    fn settlement_uses_the_seller_price() {
        let mut book = OfferBook::new(vec![
            entry(1, "a", OfferSide::Sell, 5.0, 0.12, 0),
            entry(2, "b", OfferSide::Buy, 5.0, 0.40, 0),
        ]);

        let trades = DoubleAuction.clear(&mut book, &"grid", &MarketConfig::default());

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].price_per_kwh, 0.12);
        assert_eq!(trades[0].total_credits(), 5.0 * 0.12);
    }
}
