/// Trading takes place within a pricing context. This config describes it.
///
/// The prices are fixed per deployment rather than market-responsive; they
/// are deliberately configuration, not hardcoded literals, but no dynamic
/// pricing logic exists.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarketConfig {
    /// Price attached to generated sell offers, in credits per kWh
    pub sell_price_per_kwh: f64,
    /// Price attached to generated buy offers, in credits per kWh
    pub buy_price_per_kwh: f64,
    /// Price of grid-fallback settlement, in credits per kWh
    pub grid_price_per_kwh: f64,
    /// Balance a freshly provisioned wallet starts with
    pub starting_credit: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            sell_price_per_kwh: 0.15,
            buy_price_per_kwh: 0.25,
            grid_price_per_kwh: 0.30,
            starting_credit: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_survive_partial_deserialization() {
        let config: MarketConfig = serde_json::from_str(r#"{"grid_price_per_kwh": 0.5}"#).unwrap();
        assert_eq!(config.grid_price_per_kwh, 0.5);
        assert_eq!(config.sell_price_per_kwh, 0.15);
        assert_eq!(config.buy_price_per_kwh, 0.25);
        assert_eq!(config.starting_credit, 100.0);
    }
}
