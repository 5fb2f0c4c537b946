//! Gallery sections
//!
//! A [`Section`] is one header in the media gallery together with the items
//! listed under it. The header kind is a tagged enum: only
//! [`SectionKind::YearMonth`] carries a calendar year and month.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Recency bucket of a gallery section
///
/// Sections are displayed in ascending `Ord` order: `Today`, `Yesterday`,
/// `ThisWeek`, `ThisMonth`, then `YearMonth` from the most recent month to
/// the oldest.
///
/// Serialized with an inline `type` tag:
///
/// ```rust
/// use cosmic_ext_media_gallery::SectionKind;
///
/// let kind = SectionKind::YearMonth { year: 2018, month: 2 };
/// let json = serde_json::to_value(kind).unwrap();
/// assert_eq!(json["type"], "yearMonth");
/// assert_eq!(json["month"], 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SectionKind {
    /// Since midnight of the reference day
    Today,
    /// The calendar day before the reference day
    Yesterday,
    /// Earlier this week (weeks start on Monday)
    ThisWeek,
    /// Earlier this calendar month
    ThisMonth,
    /// Any earlier calendar month
    YearMonth {
        /// Calendar year
        year: i32,
        /// Zero-based month (0 = January, 11 = December)
        month: u32,
    },
}

impl SectionKind {
    /// Section type tag as used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::ThisWeek => "thisWeek",
            Self::ThisMonth => "thisMonth",
            Self::YearMonth { .. } => "yearMonth",
        }
    }

    /// `(year, zero-based month)` for calendar month sections
    pub fn year_month(&self) -> Option<(i32, u32)> {
        match *self {
            Self::YearMonth { year, month } => Some((year, month)),
            _ => None,
        }
    }

    pub fn is_year_month(&self) -> bool {
        matches!(self, Self::YearMonth { .. })
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Today => 0,
            Self::Yesterday => 1,
            Self::ThisWeek => 2,
            Self::ThisMonth => 3,
            Self::YearMonth { .. } => 4,
        }
    }
}

impl Ord for SectionKind {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                Self::YearMonth { year, month },
                Self::YearMonth {
                    year: other_year,
                    month: other_month,
                },
            ) => (other_year, other_month).cmp(&(year, month)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SectionKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YearMonth { year, month } => write!(f, "{}-{:02}", year, month + 1),
            other => f.write_str(other.as_str()),
        }
    }
}

/// One gallery header and its items, most recent first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section<T> {
    #[serde(flatten)]
    pub kind: SectionKind,

    #[serde(rename = "mediaItems")]
    pub items: Vec<T>,
}

impl<T> Section<T> {
    pub fn new(kind: SectionKind, items: Vec<T>) -> Self {
        Self { kind, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
