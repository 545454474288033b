//! Calendar-day rate limit windows.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone, Utc};

use crate::errors::{DomainError, DomainResult};

/// Calendar days in a fixed UTC offset
///
/// A window opens at local midnight and closes at the next one, so a user
/// who exhausts the quota late in the evening waits only until midnight.
#[derive(Debug, Clone, Copy)]
pub struct DailyWindow {
    offset: FixedOffset,
}

impl DailyWindow {
    /// Window for a UTC offset given in minutes (e.g. 330 for IST)
    pub fn new(offset_minutes: i32) -> DomainResult<Self> {
        let offset = FixedOffset::east_opt(offset_minutes * 60).ok_or_else(|| {
            DomainError::internal(format!("Invalid timezone offset: {} minutes", offset_minutes))
        })?;
        Ok(Self { offset })
    }

    /// Start of the window containing `now`, as a UTC instant
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local_date = now.with_timezone(&self.offset).date_naive();
        let local_midnight = local_date.and_time(NaiveTime::MIN);
        let utc_midnight =
            local_midnight - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        Utc.from_utc_datetime(&utc_midnight)
    }

    /// Instant at which the window containing `now` rolls over
    pub fn next_rollover(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.window_start(now) + Duration::days(1)
    }

    /// Whole minutes until the next rollover, rounded up, at least 1
    pub fn minutes_until_rollover(&self, now: DateTime<Utc>) -> i64 {
        minutes_until(now, self.next_rollover(now))
    }
}

/// Whole minutes from `now` until `later`, rounded up, at least 1
pub(crate) fn minutes_until(now: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let seconds = (later - now).num_seconds();
    ((seconds + 59) / 60).max(1)
}
