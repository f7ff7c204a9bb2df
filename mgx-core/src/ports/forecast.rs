use crate::models::{ForecastRecord, ForecastSummary, SurplusWindow};

/// Repository interface for per-asset hourly forecasts.
///
/// Forecasts are the sole input to offer generation. A forecasting pass is
/// wholesale: the previous horizon is discarded, never merged.
pub trait ForecastRepository: super::Repository {
    /// Rebuild the forecast horizon from historical readings.
    ///
    /// For every asset, produces one point per hour in
    /// `[start, start + hours)`, estimating each hour as the average of the
    /// asset's readings from the previous seven days that share the target
    /// hour of day. Confidence is High with more than five samples, Medium
    /// with at least one, Low (and 0 kW) with none.
    ///
    /// # Returns
    ///
    /// The number of forecast points written.
    fn generate_forecasts(
        &self,
        start: Self::DateTime,
        hours: u32,
    ) -> impl Future<Output = Result<usize, Self::Error>> + Send;

    /// Replace the horizon with externally supplied forecast points.
    ///
    /// This is the ingestion path for a forecast collaborator that does its
    /// own modelling; it clears the table just like [`generate_forecasts`]
    /// does.
    ///
    /// [`generate_forecasts`]: ForecastRepository::generate_forecasts
    fn store_forecasts(
        &self,
        points: Vec<ForecastRecord<Self::AssetId, Self::DateTime>>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// The current horizon, ordered by hour.
    fn list_forecasts(
        &self,
    ) -> impl Future<Output = Result<Vec<ForecastRecord<Self::AssetId, Self::DateTime>>, Self::Error>>
    + Send;

    /// Fleet-wide production/consumption totals per forecast hour.
    fn forecast_summary(
        &self,
    ) -> impl Future<Output = Result<Vec<ForecastSummary<Self::DateTime>>, Self::Error>> + Send;

    /// Contiguous surplus/deficit windows over the forecast horizon.
    fn surplus_windows(
        &self,
    ) -> impl Future<Output = Result<Vec<SurplusWindow<Self::DateTime>>, Self::Error>> + Send;
}
