use std::str::FromStr;
use thiserror::Error;

/// How much historical data backs a forecast point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Confidence {
    /// No historical samples were available for this hour
    Low,
    /// A handful of samples
    Medium,
    /// More than five samples
    High,
}

impl Confidence {
    /// The canonical lowercase name, as stored by the persistence layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown confidence name.
#[derive(Debug, Error)]
#[error("unknown confidence level: {0}")]
pub struct UnknownConfidence(String);

impl FromStr for Confidence {
    type Err = UnknownConfidence;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(UnknownConfidence(other.to_owned())),
        }
    }
}

/// One hour of expected net power for one asset.
///
/// Forecast points are read-only input to offer generation. A forecasting
/// pass replaces the whole table; old points are discarded, never merged.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForecastRecord<AssetId, DateTime> {
    /// The asset this forecast is for
    pub asset_id: AssetId,
    /// The hour-aligned timestamp the forecast applies to
    pub hour: DateTime,
    /// Expected net power in kW; positive = surplus, negative = deficit
    pub expected_kw: f64,
    /// How much data backs this estimate
    pub confidence: Confidence,
}

/// The fleet-wide production/consumption balance for one forecast hour.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForecastSummary<DateTime> {
    /// The hour this summary covers
    pub hour: DateTime,
    /// Sum of all positive expected kW
    pub total_production_kw: f64,
    /// Sum of all negative expected kW (a non-positive number)
    pub total_consumption_kw: f64,
}

impl<DateTime> ForecastSummary<DateTime> {
    /// Net fleet balance for the hour; positive means surplus.
    pub fn net_balance_kw(&self) -> f64 {
        self.total_production_kw + self.total_consumption_kw
    }
}

/// A maximal run of forecast hours with the same net-balance sign.
///
/// Surplus windows are where flexible loads should be shifted to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurplusWindow<DateTime> {
    /// First hour of the window, inclusive
    pub from: DateTime,
    /// End of the window, exclusive
    pub thru: DateTime,
    /// Net kW summed over the window's hours
    pub total_net_kw: f64,
}

impl<DateTime> SurplusWindow<DateTime> {
    /// Whether the window is a surplus (true) or deficit (false) window.
    pub fn is_surplus(&self) -> bool {
        self.total_net_kw > 0.0
    }
}
