use std::str::FromStr;
use thiserror::Error;

/// The category of a grid asset.
///
/// The `Grid` kind is special: exactly one asset of this kind is expected to
/// exist, it never posts offers of its own, and it acts as the
/// infinite-capacity fallback counterparty for unmet demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AssetKind {
    /// Photovoltaic production, daylight hours only
    Solar,
    /// Wind turbine production
    Wind,
    /// Household consumption (net negative)
    Household,
    /// Storage, may charge or discharge
    Battery,
    /// The utility grid connection
    Grid,
}

impl AssetKind {
    /// The canonical lowercase name, as stored by the persistence layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solar => "solar",
            Self::Wind => "wind",
            Self::Household => "household",
            Self::Battery => "battery",
            Self::Grid => "grid",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown asset kind name.
#[derive(Debug, Error)]
#[error("unknown asset kind: {0}")]
pub struct UnknownAssetKind(String);

impl FromStr for AssetKind {
    type Err = UnknownAssetKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solar" => Ok(Self::Solar),
            "wind" => Ok(Self::Wind),
            "household" => Ok(Self::Household),
            "battery" => Ok(Self::Battery),
            "grid" => Ok(Self::Grid),
            other => Err(UnknownAssetKind(other.to_owned())),
        }
    }
}

/// A registered asset: anything that produces or consumes energy on the
/// micro-grid and therefore participates in trading.
///
/// Assets are immutable after creation apart from the activity toggle and
/// administrative edits to name and capacity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetRecord<AssetId> {
    /// Unique identifier for the asset
    pub id: AssetId,
    /// Human-readable name, e.g. "North Roof Solar Panel"
    pub name: String,
    /// The asset's category
    pub kind: AssetKind,
    /// Nameplate capacity bound, in kW
    pub max_capacity_kw: f64,
    /// Whether the asset currently participates in simulation and trading
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_roundtrips_through_names() {
        for kind in [
            AssetKind::Solar,
            AssetKind::Wind,
            AssetKind::Household,
            AssetKind::Battery,
            AssetKind::Grid,
        ] {
            assert_eq!(kind.as_str().parse::<AssetKind>().unwrap(), kind);
        }
        assert!("fusion".parse::<AssetKind>().is_err());
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&AssetKind::Household).unwrap();
        assert_eq!(json, r#""household""#);
    }
}
