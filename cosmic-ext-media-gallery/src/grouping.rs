//! Recency grouping for the media gallery
//!
//! Partitions timestamped records into gallery sections relative to a
//! caller supplied reference instant. The grouper never reads the system
//! clock, keeps no state between calls and never mutates the records it is
//! given, so the same input always produces the same sections.
//!
//! ## Example
//!
//! ```rust
//! use cosmic_ext_media_gallery::{group_media_items_by_date, parse_reference_time, SectionKind, Timestamped};
//!
//! struct Photo(i64);
//!
//! impl Timestamped for Photo {
//!     fn timestamp_ms(&self) -> i64 {
//!         self.0
//!     }
//! }
//!
//! let now = parse_reference_time("2018-04-12T18:00Z").unwrap();
//! let photos = vec![
//!     Photo(parse_reference_time("2018-03-31T23:59Z").unwrap()),
//!     Photo(parse_reference_time("2018-04-12T12:00Z").unwrap()),
//! ];
//!
//! let sections = group_media_items_by_date(now, &photos);
//! assert_eq!(sections[0].kind, SectionKind::Today);
//! assert_eq!(sections[1].kind, SectionKind::YearMonth { year: 2018, month: 2 });
//! ```

use chrono::{TimeZone, Utc};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::debug;

use crate::boundaries::CalendarBoundaries;
use crate::media_item::Timestamped;
use crate::section::{Section, SectionKind};

/// Groups records into gallery sections on one calendar
///
/// The time zone is fixed at construction and used for every boundary of a
/// call. [`RecencyGrouper::utc`] groups on UTC calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyGrouper<Tz: TimeZone = Utc> {
    tz: Tz,
}

impl RecencyGrouper<Utc> {
    pub fn utc() -> Self {
        Self { tz: Utc }
    }
}

impl Default for RecencyGrouper<Utc> {
    fn default() -> Self {
        Self::utc()
    }
}

impl<Tz: TimeZone> RecencyGrouper<Tz> {
    /// Create a grouper for the calendar of `tz`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::FixedOffset;
    /// use cosmic_ext_media_gallery::RecencyGrouper;
    ///
    /// let sydney = FixedOffset::east_opt(10 * 3600).unwrap();
    /// let grouper = RecencyGrouper::new(sydney);
    /// assert_eq!(grouper.time_zone().local_minus_utc(), 36_000);
    /// ```
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }

    /// Calendar boundaries this grouper uses for `reference`
    pub fn boundaries(&self, reference: i64) -> CalendarBoundaries<Tz> {
        CalendarBoundaries::compute(self.tz.clone(), reference)
    }

    /// Partition `items` into ordered, non-empty sections
    ///
    /// Sections come out as `Today`, `Yesterday`, `ThisWeek`, `ThisMonth`,
    /// then one `YearMonth` per calendar month, most recent first. Within a
    /// section items are sorted by descending timestamp; the sort is stable,
    /// so equal timestamps keep their input order.
    pub fn group<I, T>(&self, reference: i64, items: I) -> Vec<Section<T>>
    where
        I: IntoIterator<Item = T>,
        T: Timestamped,
    {
        let boundaries = self.boundaries(reference);

        let mut buckets: BTreeMap<SectionKind, Vec<T>> = BTreeMap::new();
        let mut total = 0usize;
        for item in items {
            let kind = boundaries.classify(item.timestamp_ms());
            buckets.entry(kind).or_default().push(item);
            total += 1;
        }

        let sections: Vec<Section<T>> = buckets
            .into_iter()
            .map(|(kind, mut items)| {
                items.sort_by_key(|item| Reverse(item.timestamp_ms()));
                Section::new(kind, items)
            })
            .collect();

        debug!(
            "Grouped {} media items into {} sections (reference {})",
            total,
            sections.len(),
            reference
        );

        sections
    }
}

/// Group media records on the UTC calendar
///
/// Shorthand for `RecencyGrouper::utc().group(reference, items)`. Pass
/// `&items` to group by reference and keep ownership of the records.
pub fn group_media_items_by_date<I, T>(reference: i64, items: I) -> Vec<Section<T>>
where
    I: IntoIterator<Item = T>,
    T: Timestamped,
{
    RecencyGrouper::utc().group(reference, items)
}
