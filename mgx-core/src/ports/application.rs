use super::{Auctioneer, CycleRepository, MarketRepository, Repository};
use crate::models::MarketConfig;

/// The application shell: everything an API surface needs to serve the
/// exchange.
///
/// An application wires a concrete repository and auctioneer together,
/// supplies identifier generation and the pricing configuration, and makes
/// the authorization decisions. The `Context` type carries whatever the
/// transport extracted to authenticate a request (a bearer token, a unit
/// value for trusted callers, and so on).
pub trait Application {
    /// Authorization context attached to each request
    type Context;
    /// The backing repository implementation
    type Repository: MarketRepository + CycleRepository<Self::Auctioneer>;
    /// The clearing engine used for matching passes
    type Auctioneer: Auctioneer<
            <Self::Repository as Repository>::OfferId,
            <Self::Repository as Repository>::AssetId,
            <Self::Repository as Repository>::DateTime,
        >;

    /// Access the repository.
    fn database(&self) -> &Self::Repository;

    /// A fresh auctioneer for one matching pass.
    fn auctioneer(&self) -> Self::Auctioneer;

    /// The pricing configuration cycles run with.
    fn market_config(&self) -> MarketConfig;

    /// The current time, in the repository's representation.
    fn now(&self) -> <Self::Repository as Repository>::DateTime;

    /// Mint an identifier for a new asset.
    fn generate_asset_id(&self) -> <Self::Repository as Repository>::AssetId;

    /// May the context read market data (offers, trades, summaries)?
    fn can_view_market(&self, context: &Self::Context) -> impl Future<Output = bool> + Send;

    /// May the context create, edit, or delete assets and profiles?
    fn can_manage_assets(&self, context: &Self::Context) -> impl Future<Output = bool> + Send;

    /// May the context trigger forecast, offer, and matching passes?
    fn can_run_cycle(&self, context: &Self::Context) -> impl Future<Output = bool> + Send;
}
