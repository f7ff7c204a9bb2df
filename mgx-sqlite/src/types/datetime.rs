//! The timestamp representation shared by every table.
//!
//! All times are UTC. The wrapper keeps serialization pinned to RFC3339 and
//! gives the rest of the crate the handful of calendar helpers the exchange
//! needs (hour bucketing, day boundaries), so no other module touches the
//! `time` crate directly.

use std::fmt::Display;
use time::format_description::well_known::Rfc3339;

/// A UTC timestamp with subsecond precision.
///
/// Stored in SQLite as text; because the encoding is fixed-width and
/// lexicographic, range comparisons in SQL behave like time comparisons.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    sqlx::Type,
)]
#[serde(from = "Rfc3339Stamp", into = "Rfc3339Stamp")]
#[sqlx(transparent)]
pub struct DateTime(time::PrimitiveDateTime);

impl DateTime {
    /// The hour of day this timestamp falls in, `0..24`.
    pub fn hour_of_day(&self) -> u8 {
        self.0.hour()
    }

    /// This timestamp truncated to the start of its hour.
    pub fn hour_floor(&self) -> Self {
        let time = time::Time::from_hms(self.0.hour(), 0, 0).unwrap();
        Self(self.0.replace_time(time))
    }

    /// Midnight of the day this timestamp falls in.
    pub fn start_of_day(&self) -> Self {
        Self(self.0.replace_time(time::Time::MIDNIGHT))
    }

    /// This timestamp shifted by a whole number of hours.
    pub fn plus_hours(&self, hours: i64) -> Self {
        Self(self.0 + time::Duration::hours(hours))
    }

    /// This timestamp shifted back by a whole number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - time::Duration::days(days))
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: time::OffsetDateTime = (*self).into();
        write!(f, "{}", value.format(&Rfc3339).unwrap())
    }
}

impl From<time::OffsetDateTime> for DateTime {
    fn from(value: time::OffsetDateTime) -> Self {
        let utc = value.to_offset(time::UtcOffset::UTC);
        Self(time::PrimitiveDateTime::new(utc.date(), utc.time()))
    }
}

impl From<DateTime> for time::OffsetDateTime {
    fn from(value: DateTime) -> Self {
        value.0.assume_utc()
    }
}

// Serialization detours through this helper so that JSON always carries
// RFC3339 strings rather than the `time` crate's default representation.

#[derive(serde::Serialize, serde::Deserialize)]
struct Rfc3339Stamp(#[serde(with = "time::serde::rfc3339")] time::OffsetDateTime);

impl From<Rfc3339Stamp> for DateTime {
    fn from(value: Rfc3339Stamp) -> Self {
        value.0.into()
    }
}

impl From<DateTime> for Rfc3339Stamp {
    fn from(value: DateTime) -> Self {
        Rfc3339Stamp(value.into())
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for DateTime {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "DateTime".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "format": "date-time",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn calendar_helpers() {
        let stamp = DateTime(datetime!(2025-06-15 14:37:21));
        assert_eq!(stamp.hour_of_day(), 14);
        assert_eq!(stamp.hour_floor(), DateTime(datetime!(2025-06-15 14:00:00)));
        assert_eq!(stamp.start_of_day(), DateTime(datetime!(2025-06-15 0:00:00)));
        assert_eq!(
            stamp.plus_hours(10),
            DateTime(datetime!(2025-06-16 0:37:21))
        );
        assert_eq!(
            stamp.minus_days(7),
            DateTime(datetime!(2025-06-08 14:37:21))
        );
    }

    #[test]
    fn displays_rfc3339() {
        let stamp = DateTime(datetime!(2025-06-15 14:00:00));
        assert_eq!(stamp.to_string(), "2025-06-15T14:00:00Z");
    }
}
