//! Local business calendar.
//!
//! Membership expiry is a calendar date at the gym, not a UTC instant. The
//! clock converts "now" to the gym's local date using a fixed UTC offset.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

use super::{Timestamp, ValidationError};

/// Source of the current instant and the gym's current calendar date.
#[derive(Debug, Clone, Copy)]
pub struct GymClock {
    offset: FixedOffset,
    pinned_today: Option<NaiveDate>,
}

impl GymClock {
    /// Clock that uses UTC as the local calendar.
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
            pinned_today: None,
        }
    }

    /// Clock for a gym located `minutes` east of UTC (negative for west).
    pub fn with_offset_minutes(minutes: i32) -> Result<Self, ValidationError> {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ValidationError::out_of_range("utc_offset_minutes", -1439, 1439, minutes)
            })?;
        Ok(Self {
            offset,
            pinned_today: None,
        })
    }

    /// Clock whose calendar date never moves. Instants still come from the system.
    pub fn pinned(today: NaiveDate) -> Self {
        Self {
            pinned_today: Some(today),
            ..Self::utc()
        }
    }

    /// The current instant.
    pub fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    /// The gym's current calendar date.
    pub fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| self.now().local_date(self.offset))
    }
}

impl Default for GymClock {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_clock_returns_pinned_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(GymClock::pinned(date).today(), date);
    }

    #[test]
    fn offset_outside_a_day_is_rejected() {
        assert!(GymClock::with_offset_minutes(24 * 60).is_err());
        assert!(GymClock::with_offset_minutes(-3 * 60).is_ok());
    }

    #[test]
    fn utc_clock_matches_system_date() {
        let today = GymClock::utc().today();
        let system = Utc::now().date_naive();
        // Midnight can pass between the two reads.
        assert!((system - today).num_days().abs() <= 1);
    }
}
