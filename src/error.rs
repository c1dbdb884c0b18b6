use crate::transport::TransportError;
use crate::types::document::DocumentHandle;
use thiserror::Error;

/// Structured error context for validation and configuration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or option name that caused the error (e.g., "target_lang", "glossary.name")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., offending value)
    pub details: Option<String>,
    /// Source of the error (e.g., "glossary_term", "builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Discriminant of [`Error`], for callers that branch on the failure category
/// ("retry later" vs. "fix my input" vs. "check your glossary").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Connection,
    BadRequest,
    Authorization,
    NotFound,
    GlossaryNotFound,
    TooManyRequests,
    QuotaExceeded,
    DocumentNotReady,
    ServiceUnavailable,
    Unexpected,
    Validation,
    Format,
    DocumentFailed,
    DocumentTranslation,
    Cancelled,
    Configuration,
    Io,
    Serialization,
}

/// Unified error type for the client.
///
/// Transport and HTTP failures are classified once, close to the network boundary;
/// local validation failures are raised before any request is issued.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Connection failure: {source}")]
    Connection {
        retryable: bool,
        #[source]
        source: TransportError,
    },

    #[error("Bad request{}", format_suffix(.message))]
    BadRequest { message: String },

    #[error("Authorization failure, check auth_key{}", format_suffix(.message))]
    Authorization { message: String },

    #[error("Not found, check server_url{}", format_suffix(.message))]
    NotFound { message: String },

    #[error("Glossary not found{}", format_suffix(.message))]
    GlossaryNotFound { message: String },

    #[error("Too many requests, the server is currently experiencing high load{}", format_suffix(.message))]
    TooManyRequests { message: String },

    #[error("Quota for this billing period has been exceeded{}", format_suffix(.message))]
    QuotaExceeded { message: String },

    #[error("Document not ready{}", format_suffix(.message))]
    DocumentNotReady { message: String },

    #[error("Service unavailable (HTTP {status}){}", format_suffix(.message))]
    ServiceUnavailable { status: u16, message: String },

    #[error("Unexpected response (HTTP {status}){}", format_suffix(.message))]
    Unexpected { status: u16, message: String },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Format error: {message}")]
    Format {
        message: String,
        /// 1-based line number of the offending TSV line, if any
        line: Option<usize>,
    },

    /// The service finished the job in its error state.
    #[error("Document translation failed on the server: {message}")]
    DocumentFailed { document_id: String, message: String },

    #[error("Error occurred during document translation: {message}")]
    DocumentTranslation {
        message: String,
        /// Present once the upload succeeded; use it to resume status/download later.
        handle: Option<DocumentHandle>,
        #[source]
        source: Box<Error>,
    },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_suffix(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(", {}", message)
    }
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Create a new validation error without context
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::validation_with_context(msg, ErrorContext::new())
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn format(msg: impl Into<String>, line: Option<usize>) -> Self {
        Error::Format {
            message: msg.into(),
            line,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Connection { .. } => ErrorKind::Connection,
            Error::BadRequest { .. } => ErrorKind::BadRequest,
            Error::Authorization { .. } => ErrorKind::Authorization,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::GlossaryNotFound { .. } => ErrorKind::GlossaryNotFound,
            Error::TooManyRequests { .. } => ErrorKind::TooManyRequests,
            Error::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            Error::DocumentNotReady { .. } => ErrorKind::DocumentNotReady,
            Error::ServiceUnavailable { .. } => ErrorKind::ServiceUnavailable,
            Error::Unexpected { .. } => ErrorKind::Unexpected,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Format { .. } => ErrorKind::Format,
            Error::DocumentFailed { .. } => ErrorKind::DocumentFailed,
            Error::DocumentTranslation { .. } => ErrorKind::DocumentTranslation,
            Error::Cancelled => ErrorKind::Cancelled,
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::Io(_) => ErrorKind::Io,
            Error::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Kind of the innermost failure, looking through document translation wrappers.
    pub fn root_kind(&self) -> ErrorKind {
        match self {
            Error::DocumentTranslation { source, .. } => source.root_kind(),
            other => other.kind(),
        }
    }

    /// Whether waiting and repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Connection { retryable, .. } => *retryable,
            Error::TooManyRequests { .. } | Error::ServiceUnavailable { .. } => true,
            _ => false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.root_kind() == ErrorKind::Cancelled
    }

    /// Handle of the in-flight document job carried by a document translation failure.
    pub fn document_handle(&self) -> Option<&DocumentHandle> {
        match self {
            Error::DocumentTranslation { handle, .. } => handle.as_ref(),
            _ => None,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Validation { context, .. } | Error::Configuration { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }
}

impl Error {
    /// A response body that failed after the dispatcher returned.
    ///
    /// The request is not repeated at that point, so the error is never tagged retryable.
    pub fn interrupted_body(source: TransportError) -> Self {
        Error::Connection {
            retryable: false,
            source,
        }
    }
}

impl From<TransportError> for Error {
    fn from(source: TransportError) -> Self {
        Error::Connection {
            retryable: source.is_retryable(),
            source,
        }
    }
}
