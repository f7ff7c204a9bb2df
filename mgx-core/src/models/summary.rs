/// Same-day aggregate view of the market, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketSummary {
    /// Total kWh traded on the internal market today (grid trades excluded)
    pub total_internal_kwh: f64,
    /// Simple average of internal per-trade prices; 0 when no internal trades
    pub average_price_per_kwh: f64,
    /// external kWh / (external + internal kWh) * 100; 0 when no trades.
    /// Always within [0, 100].
    pub grid_dependency_pct: f64,
}

/// Same-day production/consumption statistics derived from raw readings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayStats<AssetId> {
    /// Sum of positive readings today, in kWh
    pub total_production_kwh: f64,
    /// Sum of the magnitudes of negative readings today, in kWh
    pub total_consumption_kwh: f64,
    /// min(100, production / consumption * 100); 100 when consumption is 0
    pub efficiency_score: f64,
    /// The asset that consumed the most today, if any consumed at all
    pub top_consumer: Option<AssetId>,
}
