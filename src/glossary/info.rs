use serde::{Deserialize, Serialize};

use crate::types::language::standardize_language_code;

/// Metadata of a stored glossary. Entries are fetched separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryInfo {
    pub glossary_id: String,
    pub name: String,
    /// Whether the glossary can be used in translations yet.
    pub ready: bool,
    pub source_lang: String,
    pub target_lang: String,
    /// ISO 8601 timestamp as reported by the service.
    pub creation_time: String,
    pub entry_count: u64,
}

/// A source/target pair that glossaries may be created for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryLanguagePair {
    pub source_lang: String,
    pub target_lang: String,
}

impl GlossaryLanguagePair {
    pub(crate) fn standardized(self) -> Self {
        Self {
            source_lang: standardize_language_code(&self.source_lang),
            target_lang: standardize_language_code(&self.target_lang),
        }
    }
}

/// Wire format of glossary entries sent on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntriesFormat {
    Tsv,
    /// Parsed by the service only.
    Csv,
}

impl EntriesFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            EntriesFormat::Tsv => "tsv",
            EntriesFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlossaryListResponse {
    pub glossaries: Vec<GlossaryInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlossaryLanguagesResponse {
    pub supported_languages: Vec<GlossaryLanguagePair>,
}
