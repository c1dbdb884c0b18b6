use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A style rule set stored on the account.
///
/// `configured_rules` and `custom_instructions` are only present when the list was requested
/// with `detailed = true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRuleInfo {
    pub style_id: String,
    pub name: String,
    /// ISO 8601 timestamp as reported by the service.
    pub creation_time: String,
    pub updated_time: String,
    pub language: String,
    pub version: u32,
    #[serde(default)]
    pub configured_rules: Option<ConfiguredRules>,
    #[serde(default)]
    pub custom_instructions: Option<Vec<CustomInstruction>>,
}

/// Rule settings per category, keyed by rule name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredRules {
    #[serde(default)]
    pub dates_and_times: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub formatting: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub numbers: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub punctuation: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub spelling_and_grammar: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub style_and_tone: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub vocabulary: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomInstruction {
    pub label: String,
    pub prompt: String,
    #[serde(default)]
    pub source_language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StyleRuleListResponse {
    pub style_rules: Vec<StyleRuleInfo>,
}
