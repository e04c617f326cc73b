//! API constants
//!
//! Route prefix and request-shaping limits shared across the server setup.

/// API base path prefix (version-independent)
pub const API_BASE: &str = "/api";

/// Versioned prefix all routes mount under.
pub const API_PREFIX: &str = "/api/v0";

/// Multipart framing overhead allowed on top of the configured maximum
/// file size when sizing the request body limit.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Upper bound on concurrently processed requests.
pub const MAX_CONCURRENT_REQUESTS: usize = 512;
