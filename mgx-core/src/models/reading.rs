/// A historical net-power sample for an asset.
///
/// Positive values are production (a surplus fed into the micro-grid),
/// negative values are consumption. Readings are the raw input for forecast
/// generation and for the daily statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadingRecord<AssetId, DateTime> {
    /// The asset that reported the sample
    pub asset_id: AssetId,
    /// When the sample was taken
    pub timestamp: DateTime,
    /// Net power, in kW; positive = production, negative = consumption
    pub value_kw: f64,
}
