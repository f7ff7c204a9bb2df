use crate::models::{MarketConfig, OfferBook, Trade};

/// Interface for the clearing engine that matches one cycle's offer book.
///
/// An auctioneer is a pure function over the checked-out book: given
/// exclusive access to the entries, it produces fills and mutates remaining
/// quantities and activity flags in place. It performs no I/O and no
/// randomization: given the same book, it must produce the same fills in
/// the same order. Persistence of the mutated book and of the fills (and
/// the corresponding wallet legs) is the repository's job.
pub trait Auctioneer<OfferId, AssetId: PartialEq + Clone, DateTime: Ord> {
    /// Run one full matching pass over `book`.
    ///
    /// On return, every entry that was an active buy at entry is inactive
    /// with zero remaining quantity, cleared internally or settled against
    /// `grid_asset` at `config.grid_price_per_kwh`. Sell entries with
    /// remaining quantity are left active.
    fn clear(
        &self,
        book: &mut OfferBook<OfferId, AssetId, DateTime>,
        grid_asset: &AssetId,
        config: &MarketConfig,
    ) -> Vec<Trade<AssetId>>;
}
