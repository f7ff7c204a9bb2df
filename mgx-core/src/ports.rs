mod application;
mod asset;
mod auctioneer;
mod cycle;
mod flexible;
mod forecast;
mod ledger;
mod offer;
mod reading;

pub use application::Application;
pub use asset::AssetRepository;
pub use auctioneer::Auctioneer;
pub use cycle::{CycleRepository, TradeRepository};
pub use flexible::FlexibleLoadRepository;
pub use forecast::ForecastRepository;
pub use ledger::LedgerRepository;
pub use offer::OfferRepository;
pub use reading::ReadingRepository;

/// The associated-type bundle shared by every repository port.
///
/// Implementations choose their own identifier, timestamp, and error types;
/// the bounds here are the least that the clearing engine and the ports
/// require of them.
pub trait Repository {
    /// Error type surfaced by every repository operation
    type Error: std::error::Error + Send + Sync + 'static;
    /// Timestamp type; must be totally ordered for price-time priority
    type DateTime: Ord + Clone + Send + Sync + 'static;
    /// Identifier for assets
    type AssetId: Eq + std::hash::Hash + Clone + Send + Sync + 'static;
    /// Identifier for offers
    type OfferId: Eq + Clone + Send + Sync + 'static;
    /// Identifier for trades
    type TradeId: Eq + Clone + Send + Sync + 'static;
}

/// The marker trait implied by a full repository implementation.
pub trait MarketRepository:
    AssetRepository
    + ReadingRepository
    + ForecastRepository
    + OfferRepository
    + LedgerRepository
    + TradeRepository
    + FlexibleLoadRepository
{
}
