use crate::models::{DayStats, ReadingRecord};

/// Repository interface for historical net-power readings.
pub trait ReadingRepository: super::Repository {
    /// Append a batch of readings.
    fn record_readings(
        &self,
        readings: Vec<ReadingRecord<Self::AssetId, Self::DateTime>>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// The most recent readings, newest first.
    fn recent_readings(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ReadingRecord<Self::AssetId, Self::DateTime>>, Self::Error>>
    + Send;

    /// Production/consumption statistics for the day containing `as_of`.
    fn day_stats(
        &self,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<DayStats<Self::AssetId>, Self::Error>> + Send;
}
