/// Maximum number of attempts for one logical outbound call
pub const MAX_ATTEMPTS: u32 = 3;

/// Lower bound of the randomized wait between attempts, in seconds
pub const RETRY_BACKOFF_SECONDS: u64 = 1;

/// Upper bound of the randomized wait between attempts, in seconds
pub const RETRY_BACKOFF_MAX_SECONDS: u64 = 3;

/// Per-attempt deadline, in seconds
pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// Longest response body excerpt carried in a status failure
pub const ERROR_BODY_EXCERPT_CHARS: usize = 200;
