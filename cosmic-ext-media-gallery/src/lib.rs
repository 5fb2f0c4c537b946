//! COSMIC Ext Media Gallery
//!
//! Groups the media attachments of a conversation into the sections shown by
//! the messaging gallery: "Today", "Yesterday", "This Week", "This Month",
//! then one section per earlier calendar month.
//!
//! The grouping is a pure function of a reference instant and the records;
//! the caller decides what "now" is. Rendering, localisation of section
//! labels and fetching the records happen elsewhere.

pub mod boundaries;
pub mod grouping;
pub mod media_item;
pub mod section;
pub mod timestamp;

mod error;

pub use boundaries::CalendarBoundaries;
pub use error::{GalleryError, Result};
pub use grouping::{group_media_items_by_date, RecencyGrouper};
pub use media_item::{load_media_items, Attachment, MediaItem, MessageRef, Timestamped};
pub use section::{Section, SectionKind};
pub use timestamp::{datetime_from_millis, parse_reference_time, parse_utc_offset};
