use std::str::FromStr;
use thiserror::Error;

/// The direction of a standing offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OfferSide {
    /// The asset wants to purchase energy to cover a forecast deficit
    Buy,
    /// The asset wants to sell a forecast surplus
    Sell,
}

impl OfferSide {
    /// The canonical lowercase name, as stored by the persistence layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl std::fmt::Display for OfferSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown offer side name.
#[derive(Debug, Error)]
#[error("unknown offer side: {0}")]
pub struct UnknownOfferSide(String);

impl FromStr for OfferSide {
    type Err = UnknownOfferSide;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(UnknownOfferSide(other.to_owned())),
        }
    }
}

/// A standing intent to buy or sell a quantity of energy at a fixed price
/// for one trading cycle.
///
/// `quantity_kwh` is the *remaining* quantity: the matching pass decrements
/// it as fills occur. An inactive offer's remaining quantity is frozen at
/// its last value and the offer is never matched again. Offer generation
/// creates at most one open offer per asset and side per cycle, and
/// deactivates every previously-active offer first, so no two live offers
/// for the same asset ever overlap in time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OfferRecord<OfferId, AssetId, DateTime> {
    /// Unique identifier for the offer
    pub id: OfferId,
    /// The asset this offer belongs to
    pub asset_id: AssetId,
    /// Whether the asset is buying or selling
    pub side: OfferSide,
    /// Remaining quantity, in kWh; never negative
    pub quantity_kwh: f64,
    /// Posted price, in credits per kWh; never negative
    pub price_per_kwh: f64,
    /// When the offer was created; the time component of price-time priority
    pub created_at: DateTime,
    /// Whether the offer may still participate in matching
    pub is_active: bool,
}
