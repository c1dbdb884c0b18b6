use serde::{Deserialize, Serialize};

use crate::glossary::entries::GlossaryEntries;
use crate::glossary::info::EntriesFormat;
use crate::{Error, Result};

/// Metadata of a glossary that holds one dictionary per language pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultilingualGlossaryInfo {
    pub glossary_id: String,
    pub name: String,
    /// ISO 8601 timestamp as reported by the service.
    pub creation_time: String,
    pub dictionaries: Vec<MultilingualGlossaryDictionaryInfo>,
}

impl MultilingualGlossaryInfo {
    /// Dictionary for the given pair, if the glossary has one.
    pub fn dictionary(
        &self,
        source_lang: &str,
        target_lang: &str,
    ) -> Option<&MultilingualGlossaryDictionaryInfo> {
        self.dictionaries.iter().find(|d| {
            d.source_lang.eq_ignore_ascii_case(source_lang)
                && d.target_lang.eq_ignore_ascii_case(target_lang)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultilingualGlossaryDictionaryInfo {
    pub source_lang: String,
    pub target_lang: String,
    pub entry_count: u64,
}

/// Entries of one dictionary together with its language pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultilingualGlossaryDictionaryEntries {
    pub source_lang: String,
    pub target_lang: String,
    pub entries: GlossaryEntries,
}

impl MultilingualGlossaryDictionaryEntries {
    pub fn new(
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        entries: GlossaryEntries,
    ) -> Self {
        Self {
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            entries,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MultilingualGlossaryListResponse {
    pub glossaries: Vec<MultilingualGlossaryInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DictionaryEntriesResponse {
    pub source_lang: String,
    pub target_lang: String,
    pub entries: String,
    #[serde(default)]
    pub entries_format: Option<String>,
}

impl DictionaryEntriesResponse {
    pub(crate) fn into_entries(self) -> Result<MultilingualGlossaryDictionaryEntries> {
        if let Some(format) = &self.entries_format {
            if format != EntriesFormat::Tsv.as_str() {
                return Err(Error::format(
                    format!("unsupported entries format '{}'", format),
                    None,
                ));
            }
        }
        Ok(MultilingualGlossaryDictionaryEntries {
            entries: GlossaryEntries::from_tsv(&self.entries)?,
            source_lang: self.source_lang,
            target_lang: self.target_lang,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DictionaryEntriesListResponse {
    pub dictionaries: Vec<DictionaryEntriesResponse>,
}
