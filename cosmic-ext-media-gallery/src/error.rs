//! Error handling for the media gallery
//!
//! Grouping itself never fails: every well-formed millisecond timestamp maps
//! to exactly one section. Errors only arise at the edges, when loading a
//! media export or parsing user supplied reference times and offsets.
//!
//! ## Error Propagation
//!
//! ```rust
//! use cosmic_ext_media_gallery::{MediaItem, Result};
//!
//! fn count_items(data: &[u8]) -> Result<usize> {
//!     // JSON errors are converted into GalleryError::Json
//!     let items = MediaItem::from_json_slice(data)?;
//!     Ok(items.len())
//! }
//!
//! assert_eq!(count_items(b"[]").unwrap(), 0);
//! assert!(count_items(b"{").is_err());
//! ```
//!
//! ## Error Categories
//!
//! ### I/O Errors
//! Reading an export file from disk. Converted from `std::io::Error`.
//!
//! ### Serialization Errors
//! Malformed JSON exports. Converted from `serde_json::Error`.
//!
//! ### Input Errors
//! - `InvalidTimestamp`: reference time is neither milliseconds nor RFC 3339
//! - `InvalidUtcOffset`: calendar offset is not of the form `±HH:MM`

use thiserror::Error;

/// Result type for gallery operations
pub type Result<T> = std::result::Result<T, GalleryError>;

/// Errors that can occur while preparing input for the grouper
///
/// # Examples
///
/// ```rust
/// use cosmic_ext_media_gallery::GalleryError;
///
/// let error = GalleryError::InvalidTimestamp("yesterday-ish".to_string());
/// assert_eq!(error.to_string(), "Invalid timestamp: yesterday-ish");
/// ```
#[derive(Error, Debug)]
pub enum GalleryError {
    /// I/O error while reading a media export
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reference time could not be parsed
    ///
    /// Accepted forms are integer milliseconds since the epoch and RFC 3339
    /// timestamps (optionally without seconds, e.g. `2018-04-12T18:00Z`).
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Calendar UTC offset could not be parsed
    #[error("Invalid UTC offset: {0}")]
    InvalidUtcOffset(String),
}

impl GalleryError {
    /// Whether the error was caused by user input rather than the environment
    ///
    /// Input errors are worth reporting back to the user verbatim, while I/O
    /// failures usually need the file path added as context.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GalleryError::InvalidTimestamp(_) | GalleryError::InvalidUtcOffset(_)
        )
    }

    /// Create an invalid timestamp error
    pub fn invalid_timestamp(msg: impl Into<String>) -> Self {
        GalleryError::InvalidTimestamp(msg.into())
    }

    /// Create an invalid UTC offset error
    pub fn invalid_utc_offset(msg: impl Into<String>) -> Self {
        GalleryError::InvalidUtcOffset(msg.into())
    }
}
