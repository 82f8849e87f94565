//! Network and routing constants.

/// Default base URL of the extdata web server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:7770";

/// Marker appended to chart queries so repeated requests are not served from
/// a cache.
pub const REFRESH_MARKER: (&str, &str) = ("refresh", "1");
