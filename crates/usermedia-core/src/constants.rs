//! Application-wide constants.

/// Literal body returned when an upload would exceed the per-owner image cap.
/// Kept verbatim because the bundled jQuery upload widget matches on this text.
pub const UPLOAD_LIMIT_EXCEEDED_MESSAGE: &str = "Maximum amount limit exceeded.";

/// Header the AJAX endpoints require before they reveal their existence.
pub const REQUESTED_WITH_HEADER: &str = "x-requested-with";

/// Expected value of the `X-Requested-With` header on AJAX endpoints.
pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";
