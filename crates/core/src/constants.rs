//! Shared constants for the mala counter.

/// Recitations in one completed mala.
pub const MALA_SIZE: u64 = 108;

/// Identity of the single shared record used in the absence of user accounts.
pub const ANONYMOUS_RECORD_ID: u32 = 0;

/// Number of independently counted items in a record.
pub const TRACKED_ITEM_COUNT: usize = 11;

/// Prefix every uploaded image payload must carry.
pub const IMAGE_DATA_URL_PREFIX: &str = "data:image/";

/// Shortest image payload accepted on upload.
pub const MIN_IMAGE_PAYLOAD_LEN: usize = 5;

/// Default request body limit in bytes. Image payloads arrive as data URLs.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;
