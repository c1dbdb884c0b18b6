use serde::{Deserialize, Serialize};

/// Source or target side of the language list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageType {
    Source,
    Target,
}

/// A language supported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    #[serde(rename = "language")]
    pub code: String,
    /// Only reported for target languages.
    #[serde(default)]
    pub supports_formality: Option<bool>,
}

impl Language {
    /// Normalize the code (see [`standardize_language_code`]).
    pub(crate) fn standardized(mut self) -> Self {
        self.code = standardize_language_code(&self.code);
        self
    }
}

/// Lower-case the language part and upper-case the region: `EN-us` → `en-US`.
pub fn standardize_language_code(code: &str) -> String {
    match code.split_once('-') {
        Some((lang, region)) => format!("{}-{}", lang.to_lowercase(), region.to_uppercase()),
        None => code.to_lowercase(),
    }
}

/// Language code without its regional variant: `en-GB` → `en`.
pub(crate) fn remove_regional_variant(code: &str) -> String {
    code.split('-').next().unwrap_or(code).to_lowercase()
}
