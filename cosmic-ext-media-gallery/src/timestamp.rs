//! Millisecond timestamp helpers
//!
//! Media records carry plain `i64` milliseconds since the epoch, the same
//! unit the phone side uses for SMS/MMS dates. These helpers convert them to
//! calendar values without ever failing, and parse the reference times and
//! UTC offsets a user may type.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::{GalleryError, Result};

/// Milliseconds per calendar day (UTC, no leap seconds)
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Distance kept from chrono's representable extremes
///
/// Boundary computation steps back up to a month and shifts by a zone
/// offset, so clamped instants stay this far inside the range.
const CALENDAR_MARGIN_DAYS: i64 = 32;

/// Clamp milliseconds into the range where calendar arithmetic is defined
pub fn clamp_millis(ms: i64) -> i64 {
    let margin = CALENDAR_MARGIN_DAYS * MILLIS_PER_DAY;
    let min = DateTime::<Utc>::MIN_UTC.timestamp_millis() + margin;
    let max = DateTime::<Utc>::MAX_UTC.timestamp_millis() - margin;
    ms.clamp(min, max)
}

/// Convert milliseconds since epoch into a UTC instant
///
/// Values beyond the range chrono can represent (roughly ±262,000 years) are
/// clamped just inside it, so every `i64` maps to a calendar date.
pub fn datetime_from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(clamp_millis(ms)).unwrap_or_default()
}

/// Parse a reference time given on the command line or in a fixture
///
/// Accepts:
/// - integer milliseconds since epoch (`1523556000000`)
/// - RFC 3339 (`2018-04-12T18:00:00Z`, `2018-04-12T20:00:00+02:00`)
/// - RFC 3339 without seconds (`2018-04-12T18:00Z`)
///
/// # Examples
///
/// ```rust
/// use cosmic_ext_media_gallery::parse_reference_time;
///
/// assert_eq!(parse_reference_time("2018-04-12T18:00Z").unwrap(), 1_523_556_000_000);
/// assert_eq!(parse_reference_time("1523556000000").unwrap(), 1_523_556_000_000);
/// assert!(parse_reference_time("next tuesday").is_err());
/// ```
pub fn parse_reference_time(input: &str) -> Result<i64> {
    let input = input.trim();

    if let Ok(ms) = input.parse::<i64>() {
        return Ok(ms);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.timestamp_millis());
    }

    // Short form without seconds
    if let Some(naive) = input.strip_suffix(['Z', 'z']) {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M") {
            return Ok(dt.and_utc().timestamp_millis());
        }
    } else if let Ok(dt) = DateTime::parse_from_str(input, "%Y-%m-%dT%H:%M%:z") {
        return Ok(dt.timestamp_millis());
    }

    Err(GalleryError::invalid_timestamp(input))
}

/// Parse a UTC offset of the form `±HH:MM` (or `Z` / `UTC`)
///
/// # Examples
///
/// ```rust
/// use cosmic_ext_media_gallery::parse_utc_offset;
///
/// assert_eq!(parse_utc_offset("+10:00").unwrap().local_minus_utc(), 36_000);
/// assert_eq!(parse_utc_offset("-05:30").unwrap().local_minus_utc(), -19_800);
/// assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
/// ```
pub fn parse_utc_offset(input: &str) -> Result<FixedOffset> {
    let input = input.trim();
    let invalid = || GalleryError::invalid_utc_offset(input);

    if input.eq_ignore_ascii_case("z") || input.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match input.as_bytes().first() {
        Some(b'+') => (1, &input[1..]),
        Some(b'-') => (-1, &input[1..]),
        _ => return Err(invalid()),
    };

    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let is_two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !is_two_digits(hours) || !is_two_digits(minutes) {
        return Err(invalid());
    }

    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
