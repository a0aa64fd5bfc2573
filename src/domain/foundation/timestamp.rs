//! UTC instants recorded on members, classes, reservations, and door events.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A point in time, always UTC. Serialized as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps a value read back from storage.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Calendar date of this instant at a gym with the given UTC offset.
    pub fn local_date(&self, offset: FixedOffset) -> NaiveDate {
        self.0.with_timezone(&offset).date_naive()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_as_rfc3339_string() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 6, 2, 21, 15, 0).unwrap());

        let json = serde_json::to_string(&ts).unwrap();

        assert_eq!(json, "\"2025-06-02T21:15:00Z\"");
        assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), ts);
    }

    #[test]
    fn late_evening_utc_is_still_the_same_day_west_of_greenwich() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 6, 3, 1, 30, 0).unwrap());
        let buenos_aires = FixedOffset::west_opt(3 * 3600).unwrap();

        assert_eq!(ts.local_date(buenos_aires), NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        assert_eq!(
            ts.local_date(FixedOffset::east_opt(0).unwrap()),
            NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
        );
    }
}
