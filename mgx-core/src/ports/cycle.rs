use super::Auctioneer;
use crate::models::{MarketConfig, MarketSummary, TradeRecord};

/// Repository interface for running trading cycles.
///
/// One cycle is a single atomic unit: the repository checks the active
/// offer book out, hands it to the auctioneer, and commits the mutated
/// offers, the trades, and every wallet leg together. A failure anywhere
/// before the commit leaves the previous cycle's state untouched and
/// queryable; a partially completed pass is never visible.
pub trait CycleRepository<T: Auctioneer<Self::OfferId, Self::AssetId, Self::DateTime>>:
    super::Repository
{
    /// Run one matching + settlement pass at `timestamp`.
    ///
    /// # Returns
    ///
    /// The trades created by the pass, internal fills first, in the
    /// deterministic order the auctioneer produced them.
    fn run_cycle(
        &self,
        timestamp: Self::DateTime,
        auctioneer: T,
        config: &MarketConfig,
    ) -> impl Future<
        Output = Result<
            Vec<TradeRecord<Self::TradeId, Self::AssetId, Self::DateTime>>,
            Self::Error,
        >,
    > + Send;
}

/// Repository interface for querying settled trades.
pub trait TradeRepository: super::Repository {
    /// The most recent trades, newest first.
    fn trade_history(
        &self,
        limit: usize,
    ) -> impl Future<
        Output = Result<
            Vec<TradeRecord<Self::TradeId, Self::AssetId, Self::DateTime>>,
            Self::Error,
        >,
    > + Send;

    /// Aggregate statistics over the trades of the day containing `as_of`.
    fn market_summary(
        &self,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<MarketSummary, Self::Error>> + Send;
}
