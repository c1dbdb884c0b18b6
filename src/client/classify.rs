//! Response classification: maps a completed HTTP exchange to success or a typed error.
//!
//! Pure functions of `(status, body, context)`. Retry decisions live in the dispatcher;
//! this module only answers which statuses are worth retrying.

use crate::{Error, Result};
use serde::Deserialize;

/// Call context that changes the meaning of some status codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// 503 means "document not ready" and is not retried.
    pub document_download: bool,
    /// 404 means "glossary not found".
    pub using_glossary: bool,
}

impl RequestContext {
    pub const DEFAULT: RequestContext = RequestContext {
        document_download: false,
        using_glossary: false,
    };

    pub const DOCUMENT_DOWNLOAD: RequestContext = RequestContext {
        document_download: true,
        using_glossary: false,
    };

    pub const GLOSSARY: RequestContext = RequestContext {
        document_download: false,
        using_glossary: true,
    };
}

pub const STATUS_TOO_MANY_REQUESTS: u16 = 429;
pub const STATUS_QUOTA_EXCEEDED: u16 = 456;
pub const STATUS_SERVICE_UNAVAILABLE: u16 = 503;

/// Whether a response with this status should be discarded and the request repeated.
///
/// 429 and every 5xx are transient, except 503 on a document download: that is a
/// call-order problem (the caller should poll status first), not a fault.
pub fn is_retryable_status(status: u16, context: RequestContext) -> bool {
    if status == STATUS_SERVICE_UNAVAILABLE && context.document_download {
        return false;
    }
    status == STATUS_TOO_MANY_REQUESTS || status >= 500
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    detail: Option<String>,
}

/// Human-readable server detail extracted from an error body.
///
/// JSON bodies of the form `{"message": .., "detail": ..}` are summarized; anything
/// else is passed through verbatim.
pub fn error_message_from_body(body: &str) -> String {
    if body.trim().is_empty() {
        return String::new();
    }
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => {
            let mut parts = Vec::new();
            if let Some(m) = parsed.message {
                parts.push(format!("message: {}", m));
            }
            if let Some(d) = parsed.detail {
                parts.push(format!("detail: {}", d));
            }
            if parts.is_empty() {
                format!("response: {}", body)
            } else {
                parts.join(", ")
            }
        }
        Err(_) => format!("response: {}", body),
    }
}

/// Map `status` (with its error `body`) to `Ok(())` for 2xx or the matching error kind.
pub fn check_response(status: u16, body: &str, context: RequestContext) -> Result<()> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    let message = error_message_from_body(body);
    let err = match status {
        400 => Error::BadRequest { message },
        403 => Error::Authorization { message },
        404 if context.using_glossary => Error::GlossaryNotFound { message },
        404 => Error::NotFound { message },
        STATUS_TOO_MANY_REQUESTS => Error::TooManyRequests { message },
        STATUS_QUOTA_EXCEEDED => Error::QuotaExceeded { message },
        STATUS_SERVICE_UNAVAILABLE if context.document_download => {
            Error::DocumentNotReady { message }
        }
        s if s >= 500 => Error::ServiceUnavailable { status: s, message },
        s => Error::Unexpected { status: s, message },
    };
    Err(err)
}
