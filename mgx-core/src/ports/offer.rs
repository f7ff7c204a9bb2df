use crate::models::{MarketConfig, OfferRecord};

/// Repository interface for standing trade offers.
pub trait OfferRepository: super::Repository {
    /// Derive the cycle's offers from the forecast horizon.
    ///
    /// First deactivates every currently active offer, regardless of asset
    /// or age; then, for every forecast point in the hour bucket containing
    /// `timestamp` whose asset is not the grid asset, creates a sell offer (surplus,
    /// priced at `config.sell_price_per_kwh`) or a buy offer (deficit,
    /// priced at `config.buy_price_per_kwh`). Zero-kW forecasts create
    /// nothing. Both steps happen in one transaction, so no two live offers
    /// for an asset ever overlap.
    ///
    /// Calling this again before a matching pass simply re-derives the
    /// offers from the current forecasts.
    ///
    /// # Returns
    ///
    /// The number of offers created.
    fn generate_offers(
        &self,
        timestamp: Self::DateTime,
        config: &MarketConfig,
    ) -> impl Future<Output = Result<usize, Self::Error>> + Send;

    /// Every offer still eligible for matching.
    fn active_offers(
        &self,
    ) -> impl Future<
        Output = Result<
            Vec<OfferRecord<Self::OfferId, Self::AssetId, Self::DateTime>>,
            Self::Error,
        >,
    > + Send;
}
