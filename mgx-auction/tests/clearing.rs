use approx::assert_relative_eq;
use mgx_core::{
    models::{BookEntry, MarketConfig, OfferBook, OfferSide, Trade},
    ports::Auctioneer,
};
use mgx_auction::DoubleAuction;
use rstest::*;

const GRID: &str = "grid";

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

fn clear(book: &mut OfferBook<u32, &'static str, i64>) -> Vec<Trade<&'static str>> {
    DoubleAuction.clear(book, &GRID, &MarketConfig::default())
}

#[fixture]
fn config() -> MarketConfig {
    MarketConfig::default()
}

/// The reference scenario: A sells 5 kWh @ 0.15, B buys 2 kWh @ 0.25.
/// Exactly one internal trade of 2 kWh at the seller's price; A keeps
/// 3 kWh on an active offer, B's offer is spent.
#[rstest]
fn partial_fill_against_single_seller() {
    let mut book = OfferBook::new(vec![
        entry(1, "a", OfferSide::Sell, 5.0, 0.15, 0),
        entry(2, "b", OfferSide::Buy, 2.0, 0.25, 0),
    ]);

    let trades = clear(&mut book);

    assert_eq!(trades.len(), 1);
    let trade = &trades[0];
    assert_eq!(trade.seller_asset_id, "a");
    assert_eq!(trade.buyer_asset_id, "b");
    assert_relative_eq!(trade.traded_kwh, 2.0);
    assert_relative_eq!(trade.price_per_kwh, 0.15);
    assert_relative_eq!(trade.total_credits(), 0.30);
    assert!(!trade.is_external);

    let seller = &book.entries[0];
    assert_relative_eq!(seller.remaining_kwh, 3.0);
    assert!(seller.is_active, "partially filled seller stays active");

    let buyer = &book.entries[1];
    assert_relative_eq!(buyer.remaining_kwh, 0.0);
    assert!(!buyer.is_active);
}

/// A seller with 3 kWh against a 5 kWh buyer: one 3 kWh internal fill, the
/// seller is spent, and the buyer's remaining 2 kWh go to the grid.
#[rstest]
fn buyer_larger_than_seller_falls_back_to_grid(config: MarketConfig) {
    let mut book = OfferBook::new(vec![
        entry(1, "a", OfferSide::Sell, 3.0, 0.15, 0),
        entry(2, "b", OfferSide::Buy, 5.0, 0.25, 0),
    ]);

    let trades = clear(&mut book);

    assert_eq!(trades.len(), 2);
    assert_relative_eq!(trades[0].traded_kwh, 3.0);
    assert!(!trades[0].is_external);

    let fallback = &trades[1];
    assert!(fallback.is_external);
    assert_eq!(fallback.seller_asset_id, GRID);
    assert_eq!(fallback.buyer_asset_id, "b");
    assert_relative_eq!(fallback.traded_kwh, 2.0);
    assert_relative_eq!(fallback.price_per_kwh, config.grid_price_per_kwh);

    assert!(!book.entries[0].is_active, "spent seller is deactivated");
    assert_relative_eq!(book.entries[1].remaining_kwh, 0.0);
    assert!(!book.entries[1].is_active);
}

/// Equal-priced sellers are taken oldest-first.
#[rstest]
fn ties_on_price_break_by_creation_time() {
    let mut book = OfferBook::new(vec![
        entry(1, "late", OfferSide::Sell, 5.0, 0.10, 1),
        entry(2, "early", OfferSide::Sell, 5.0, 0.10, 0),
        entry(3, "b", OfferSide::Buy, 5.0, 0.25, 0),
    ]);

    let trades = clear(&mut book);

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].seller_asset_id, "early");
    assert!(book.entries[0].is_active, "the late seller is untouched");
    assert_relative_eq!(book.entries[0].remaining_kwh, 5.0);
}

/// Cheaper sellers clear before more expensive ones, regardless of storage
/// order, and a buyer may source from several sellers in one pass.
#[rstest]
fn buyer_multi_sources_cheapest_first() {
    let mut book = OfferBook::new(vec![
        entry(1, "pricey", OfferSide::Sell, 4.0, 0.20, 0),
        entry(2, "cheap", OfferSide::Sell, 3.0, 0.10, 5),
        entry(3, "b", OfferSide::Buy, 6.0, 0.25, 0),
    ]);

    let trades = clear(&mut book);

    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].seller_asset_id, "cheap");
    assert_relative_eq!(trades[0].traded_kwh, 3.0);
    assert_relative_eq!(trades[0].price_per_kwh, 0.10);
    assert_eq!(trades[1].seller_asset_id, "pricey");
    assert_relative_eq!(trades[1].traded_kwh, 3.0);
    assert_relative_eq!(trades[1].price_per_kwh, 0.20);

    // 1 kWh left on the expensive offer; it survives for the next sweep.
    assert_relative_eq!(book.entries[0].remaining_kwh, 1.0);
    assert!(book.entries[0].is_active);
}

/// A seller may serve several buyers; the most willing buyer goes first.
#[rstest]
fn seller_multi_sells_to_buyers_in_price_order() {
    let mut book = OfferBook::new(vec![
        entry(1, "a", OfferSide::Sell, 5.0, 0.15, 0),
        entry(2, "meek", OfferSide::Buy, 4.0, 0.20, 0),
        entry(3, "keen", OfferSide::Buy, 4.0, 0.30, 5),
    ]);

    let trades = clear(&mut book);

    // The keen buyer takes 4 kWh, the meek buyer the remaining 1 kWh
    // internally and 3 kWh from the grid.
    assert_eq!(trades.len(), 3);
    assert_eq!(trades[0].buyer_asset_id, "keen");
    assert_relative_eq!(trades[0].traded_kwh, 4.0);
    assert_eq!(trades[1].buyer_asset_id, "meek");
    assert_relative_eq!(trades[1].traded_kwh, 1.0);
    assert!(trades[2].is_external);
    assert_eq!(trades[2].buyer_asset_id, "meek");
    assert_relative_eq!(trades[2].traded_kwh, 3.0);
}

/// Two offers of the same asset never trade with each other.
#[rstest]
fn no_self_trade() {
    let mut book = OfferBook::new(vec![
        entry(1, "a", OfferSide::Sell, 5.0, 0.10, 0),
        entry(2, "a", OfferSide::Buy, 5.0, 0.25, 0),
    ]);

    let trades = clear(&mut book);

    for trade in &trades {
        assert_ne!(trade.seller_asset_id, trade.buyer_asset_id);
    }
    // The buy clears externally; the sell keeps its full quantity.
    assert_eq!(trades.len(), 1);
    assert!(trades[0].is_external);
    assert_relative_eq!(book.entries[0].remaining_kwh, 5.0);
    assert!(book.entries[0].is_active);
}

/// With no sellers at all, every buyer clears in full against the grid.
#[rstest]
fn grid_fallback_clears_every_buyer(config: MarketConfig) {
    let mut book = OfferBook::new(vec![
        entry(1, "b1", OfferSide::Buy, 2.5, 0.25, 0),
        entry(2, "b2", OfferSide::Buy, 4.0, 0.25, 1),
    ]);

    let trades = clear(&mut book);

    assert_eq!(trades.len(), 2);
    for trade in &trades {
        assert!(trade.is_external);
        assert_eq!(trade.seller_asset_id, GRID);
        assert_relative_eq!(trade.price_per_kwh, config.grid_price_per_kwh);
    }
    for buyer in &book.entries {
        assert_relative_eq!(buyer.remaining_kwh, 0.0);
        assert!(!buyer.is_active, "every buy offer ends inactive");
    }
}

/// Clearing the same book twice produces identical fills in identical
/// order.
#[rstest]
fn clearing_is_deterministic() {
    let build = || {
        OfferBook::new(vec![
            entry(1, "s1", OfferSide::Sell, 4.0, 0.12, 3),
            entry(2, "s2", OfferSide::Sell, 2.0, 0.12, 1),
            entry(3, "s3", OfferSide::Sell, 6.0, 0.18, 0),
            entry(4, "b1", OfferSide::Buy, 5.0, 0.22, 2),
            entry(5, "b2", OfferSide::Buy, 9.0, 0.22, 4),
        ])
    };

    let mut first = build();
    let mut second = build();
    assert_eq!(clear(&mut first), clear(&mut second));
    assert_eq!(first.entries, second.entries);
}

/// After any clearing pass, no buy offer that entered active survives.
#[rstest]
#[case::no_sellers(vec![entry(1, "b", OfferSide::Buy, 7.0, 0.25, 0)])]
#[case::matched(vec![
    entry(1, "s", OfferSide::Sell, 9.0, 0.15, 0),
    entry(2, "b", OfferSide::Buy, 7.0, 0.25, 0),
])]
#[case::mixed(vec![
    entry(1, "s", OfferSide::Sell, 1.0, 0.15, 0),
    entry(2, "b1", OfferSide::Buy, 2.0, 0.25, 0),
    entry(3, "b2", OfferSide::Buy, 3.0, 0.20, 1),
])]
fn full_buyer_clearance(#[case] entries: Vec<BookEntry<u32, &'static str, i64>>) {
    let mut book = OfferBook::new(entries);
    clear(&mut book);

    for offer in &book.entries {
        if offer.side == OfferSide::Buy {
            assert_relative_eq!(offer.remaining_kwh, 0.0);
            assert!(!offer.is_active);
        }
    }
}
