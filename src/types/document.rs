use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::types::text::Formality;

/// Handle to an in-progress document translation.
///
/// Together the two fields authorize status and download calls; the key is a capability
/// token and should be stored like a secret. A handle rebuilt from the two strings
/// (e.g. after a process restart) is fully equivalent to the one returned by the upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentHandle {
    pub document_id: String,
    pub document_key: String,
}

impl DocumentHandle {
    pub fn new(document_id: impl Into<String>, document_key: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            document_key: document_key.into(),
        }
    }
}

/// Server-side state of a document translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentState {
    /// Translation has not started yet.
    Queued,
    Translating,
    /// Translated document may be downloaded.
    Done,
    Error,
}

impl DocumentState {
    pub fn is_terminal(self) -> bool {
        matches!(self, DocumentState::Done | DocumentState::Error)
    }
}

/// One observation of a document translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatus {
    pub document_id: String,
    pub status: DocumentState,
    /// Only meaningful while translating.
    #[serde(default)]
    pub seconds_remaining: Option<u64>,
    /// Only meaningful once done.
    #[serde(default)]
    pub billed_characters: Option<u64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl DocumentStatus {
    /// No error has occurred (yet).
    pub fn ok(&self) -> bool {
        self.status != DocumentState::Error
    }

    pub fn done(&self) -> bool {
        self.status == DocumentState::Done
    }
}

/// Poll interval used when the server gives no estimate.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Wait before the next status poll: half the server's estimate plus one second,
/// bounded to `[1s, 60s]`.
pub fn poll_interval(seconds_remaining: Option<u64>) -> Duration {
    match seconds_remaining {
        Some(secs) => Duration::from_secs(secs / 2 + 1).clamp(MIN_POLL_INTERVAL, MAX_POLL_INTERVAL),
        None => DEFAULT_POLL_INTERVAL,
    }
}

/// Options for document uploads; all fields are passed through to the service.
#[derive(Debug, Clone, Default)]
pub struct DocumentTranslationOptions {
    pub formality: Option<Formality>,
    pub glossary_id: Option<String>,
    /// Raw body parameters; they replace same-named parameters built from other options.
    pub extra_body_parameters: BTreeMap<String, String>,
}

impl DocumentTranslationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn formality(mut self, formality: Formality) -> Self {
        self.formality = Some(formality);
        self
    }

    pub fn glossary_id(mut self, glossary_id: impl Into<String>) -> Self {
        self.glossary_id = Some(glossary_id.into());
        self
    }

    pub fn extra_body_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_body_parameters.insert(key.into(), value.into());
        self
    }
}
