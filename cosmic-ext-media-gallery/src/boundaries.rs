//! Calendar boundaries relative to a reference instant
//!
//! All four boundaries are midnights in one explicit time zone:
//!
//! | Boundary              | Midnight of                                  |
//! |-----------------------|----------------------------------------------|
//! | `start_of_today`      | the reference day                            |
//! | `start_of_yesterday`  | the day before the reference day             |
//! | `start_of_this_week`  | the Monday on or before the reference day    |
//! | `start_of_this_month` | the first day of the reference month         |
//!
//! Classification tests them in that order and the first `>=` match wins, so
//! an instant exactly on a boundary belongs to the more recent bucket.

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::trace;

use crate::section::SectionKind;
use crate::timestamp::datetime_from_millis;

/// How far past a skipped local midnight to search for the first valid time
const DST_GAP_SEARCH_MINUTES: i64 = 180;

/// Start-of-period instants for one reference time, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarBoundaries<Tz: TimeZone = Utc> {
    tz: Tz,
    reference: i64,
    start_of_today: i64,
    start_of_yesterday: i64,
    start_of_this_week: i64,
    start_of_this_month: i64,
}

impl CalendarBoundaries<Utc> {
    /// Boundaries on the UTC calendar
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cosmic_ext_media_gallery::{parse_reference_time, CalendarBoundaries};
    ///
    /// // Thursday 2018-04-12 18:00 UTC
    /// let reference = parse_reference_time("2018-04-12T18:00Z").unwrap();
    /// let boundaries = CalendarBoundaries::utc(reference);
    ///
    /// assert_eq!(boundaries.start_of_today(), parse_reference_time("2018-04-12T00:00Z").unwrap());
    /// assert_eq!(boundaries.start_of_this_week(), parse_reference_time("2018-04-09T00:00Z").unwrap());
    /// assert_eq!(boundaries.start_of_this_month(), parse_reference_time("2018-04-01T00:00Z").unwrap());
    /// ```
    pub fn utc(reference: i64) -> Self {
        Self::compute(Utc, reference)
    }
}

impl<Tz: TimeZone> CalendarBoundaries<Tz> {
    /// Compute the boundaries for `reference` on the calendar of `tz`
    pub fn compute(tz: Tz, reference: i64) -> Self {
        let today = datetime_from_millis(reference)
            .with_timezone(&tz)
            .date_naive();

        let yesterday = today.pred_opt().unwrap_or(today);
        let week_start = today
            .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
            .unwrap_or(today);
        let month_start = today.with_day(1).unwrap_or(today);

        let boundaries = Self {
            start_of_today: start_of_day(&tz, today),
            start_of_yesterday: start_of_day(&tz, yesterday),
            start_of_this_week: start_of_day(&tz, week_start),
            start_of_this_month: start_of_day(&tz, month_start),
            reference,
            tz,
        };

        trace!(
            "Calendar boundaries for {}: today={} yesterday={} week={} month={}",
            reference,
            boundaries.start_of_today,
            boundaries.start_of_yesterday,
            boundaries.start_of_this_week,
            boundaries.start_of_this_month
        );

        boundaries
    }

    /// Bucket for an instant, testing the boundaries most recent first
    pub fn classify(&self, timestamp: i64) -> SectionKind {
        if timestamp >= self.start_of_today {
            SectionKind::Today
        } else if timestamp >= self.start_of_yesterday {
            SectionKind::Yesterday
        } else if timestamp >= self.start_of_this_week {
            SectionKind::ThisWeek
        } else if timestamp >= self.start_of_this_month {
            SectionKind::ThisMonth
        } else {
            let date = datetime_from_millis(timestamp).with_timezone(&self.tz);
            SectionKind::YearMonth {
                year: date.year(),
                month: date.month0(),
            }
        }
    }

    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }

    pub fn reference(&self) -> i64 {
        self.reference
    }

    pub fn start_of_today(&self) -> i64 {
        self.start_of_today
    }

    pub fn start_of_yesterday(&self) -> i64 {
        self.start_of_yesterday
    }

    pub fn start_of_this_week(&self) -> i64 {
        self.start_of_this_week
    }

    pub fn start_of_this_month(&self) -> i64 {
        self.start_of_this_month
    }
}

/// First instant of `date` in `tz`, in milliseconds
///
/// An ambiguous midnight resolves to the earlier instant. A skipped midnight
/// (DST transition at 00:00) resolves to the first valid local time after it.
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);

    if let Some(start) = tz.from_local_datetime(&midnight).earliest() {
        return start.timestamp_millis();
    }

    (1..=DST_GAP_SEARCH_MINUTES)
        .find_map(|minutes| {
            tz.from_local_datetime(&(midnight + Duration::minutes(minutes)))
                .earliest()
        })
        .map(|start| start.timestamp_millis())
        .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
}
