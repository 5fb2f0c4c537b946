//! Media records shown in a conversation's media gallery
//!
//! A [`MediaItem`] is one attachment of one message, together with a
//! reference back to that message. The gallery groups items by the time the
//! message was received; everything else is carried through untouched.
//!
//! ## JSON Format
//!
//! Exports use the field names of the desktop messenger's media store:
//!
//! ```json
//! {
//!   "objectURL": "blob:1234",
//!   "index": 0,
//!   "message": {
//!     "conversationId": "1234",
//!     "id": "id",
//!     "received_at": 1523534400000,
//!     "received_at_ms": 1523534400000,
//!     "sent_at": 1523534399000,
//!     "attachments": []
//!   },
//!   "attachment": {
//!     "fileName": "fileName",
//!     "contentType": "image/jpeg",
//!     "url": "url"
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::Result;

/// MIME type prefix for images
pub const MIME_IMAGE_PREFIX: &str = "image/";

/// MIME type prefix for videos
pub const MIME_VIDEO_PREFIX: &str = "video/";

/// JPEG images, the most common gallery content type
pub const IMAGE_JPEG: &str = "image/jpeg";

/// Anything that carries exactly one bucketing timestamp
///
/// The grouper only ever reads this value; it never inspects or alters the
/// rest of the record. Implemented for references so callers can group
/// borrowed items and keep their identity.
pub trait Timestamped {
    /// Milliseconds since the Unix epoch
    fn timestamp_ms(&self) -> i64;
}

impl<T: Timestamped + ?Sized> Timestamped for &T {
    fn timestamp_ms(&self) -> i64 {
        (**self).timestamp_ms()
    }
}

impl Timestamped for i64 {
    fn timestamp_ms(&self) -> i64 {
        *self
    }
}

impl<T: Timestamped + ?Sized> Timestamped for Box<T> {
    fn timestamp_ms(&self) -> i64 {
        (**self).timestamp_ms()
    }
}

/// Message attachment metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Original file name, if the sender supplied one
    #[serde(rename = "fileName", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// MIME content type (e.g. `image/jpeg`)
    #[serde(rename = "contentType")]
    pub content_type: String,

    /// Local URL of the downloaded attachment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Attachment {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            file_name: None,
            content_type: content_type.into(),
            url: None,
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with(MIME_IMAGE_PREFIX)
    }

    pub fn is_video(&self) -> bool {
        self.content_type.starts_with(MIME_VIDEO_PREFIX)
    }

    /// Whether the gallery can show a visual thumbnail for this attachment
    pub fn is_visual_media(&self) -> bool {
        self.is_image() || self.is_video()
    }
}

/// Reference to the message an attachment belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    /// Conversation the message was posted in
    #[serde(rename = "conversationId")]
    pub conversation_id: String,

    /// Message ID
    pub id: String,

    /// Receive time (milliseconds since epoch)
    pub received_at: i64,

    /// Receive time with full millisecond precision, when recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_at_ms: Option<i64>,

    /// Send time as reported by the sender (milliseconds since epoch)
    pub sent_at: i64,

    /// All attachments of the message
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl MessageRef {
    /// Time used to place the message in the gallery
    ///
    /// Prefers `received_at_ms`, falling back to `received_at` for records
    /// written before the precise field existed.
    pub fn received_timestamp(&self) -> i64 {
        self.received_at_ms.unwrap_or(self.received_at)
    }
}

/// One attachment of one message, as shown in the media gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// URL used to display the media
    #[serde(rename = "objectURL", default, skip_serializing_if = "Option::is_none")]
    pub object_url: Option<String>,

    /// Index of the attachment within its message
    pub index: usize,

    /// Owning message
    pub message: MessageRef,

    /// The attachment itself
    pub attachment: Attachment,
}

impl MediaItem {
    /// Parse a JSON array of media items
    pub fn from_json_slice(data: &[u8]) -> Result<Vec<Self>> {
        let items: Vec<Self> = serde_json::from_slice(data)?;
        debug!("Parsed {} media items", items.len());
        Ok(items)
    }
}

impl Timestamped for MediaItem {
    fn timestamp_ms(&self) -> i64 {
        self.message.received_timestamp()
    }
}

/// Load a JSON media export from disk
pub fn load_media_items(path: impl AsRef<Path>) -> Result<Vec<MediaItem>> {
    let path = path.as_ref();
    debug!("Loading media items from {}", path.display());
    let data = std::fs::read(path)?;
    MediaItem::from_json_slice(&data)
}
