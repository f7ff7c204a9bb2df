/// The shiftability envelope of a flexible load.
///
/// Profiles describe how far an asset's draw can be moved in time; only
/// profiles marked shiftable are considered by the recommendation pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlexibleLoadRecord<AssetId> {
    /// The asset this profile describes
    pub asset_id: AssetId,
    /// Lower power bound, in kW (negative = drawing)
    pub min_kw: f64,
    /// Upper power bound, in kW
    pub max_kw: f64,
    /// Whether the load may be moved outside its preferred window
    pub is_shiftable: bool,
    /// Preferred window start, hour of day [0, 24)
    pub preferred_start_hour: u8,
    /// Preferred window end, hour of day [0, 24); may wrap past midnight
    pub preferred_end_hour: u8,
}

/// A suggestion to move a flexible load into a forecast surplus window.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadShiftRecommendation {
    /// Name of the asset the recommendation applies to
    pub asset_name: String,
    /// Current window start, hour of day
    pub current_start_hour: u8,
    /// Current window end, hour of day
    pub current_end_hour: u8,
    /// Suggested window start, hour of day
    pub suggested_start_hour: u8,
    /// Suggested window end, hour of day
    pub suggested_end_hour: u8,
    /// Rough estimate of energy sourced from surplus instead of the grid
    pub expected_savings_kwh: f64,
}
