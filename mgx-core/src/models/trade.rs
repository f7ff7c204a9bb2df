/// A settled trade between two assets.
///
/// Trades are append-only: once written by a matching pass they are never
/// modified. `is_external` marks settlement against the utility-grid
/// fallback; such trades are excluded from internal-market statistics but
/// still count toward total demand when computing grid dependency.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeRecord<TradeId, AssetId, DateTime> {
    /// Unique identifier for the trade
    pub id: TradeId,
    /// The asset that delivered energy
    pub seller_asset_id: AssetId,
    /// The asset that received energy
    pub buyer_asset_id: AssetId,
    /// Quantity traded, in kWh; always positive
    pub traded_kwh: f64,
    /// Clearing price, in credits per kWh (the seller's posted price)
    pub price_per_kwh: f64,
    /// Total value transferred: `traded_kwh * price_per_kwh`
    pub total_credits: f64,
    /// When the trade settled (the cycle timestamp)
    pub executed_at: DateTime,
    /// Whether the counterparty was the grid fallback
    pub is_external: bool,
}
