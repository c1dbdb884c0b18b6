use serde::{Deserialize, Serialize};

use crate::types::language::standardize_language_code;

/// Writing style requested from the rephrase endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritingStyle {
    Academic,
    Business,
    Casual,
    Default,
    PreferAcademic,
    PreferBusiness,
    PreferCasual,
    PreferSimple,
    Simple,
}

impl WritingStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            WritingStyle::Academic => "academic",
            WritingStyle::Business => "business",
            WritingStyle::Casual => "casual",
            WritingStyle::Default => "default",
            WritingStyle::PreferAcademic => "prefer_academic",
            WritingStyle::PreferBusiness => "prefer_business",
            WritingStyle::PreferCasual => "prefer_casual",
            WritingStyle::PreferSimple => "prefer_simple",
            WritingStyle::Simple => "simple",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritingTone {
    Confident,
    Default,
    Diplomatic,
    Enthusiastic,
    Friendly,
    PreferConfident,
    PreferDiplomatic,
    PreferEnthusiastic,
    PreferFriendly,
}

impl WritingTone {
    pub fn as_str(self) -> &'static str {
        match self {
            WritingTone::Confident => "confident",
            WritingTone::Default => "default",
            WritingTone::Diplomatic => "diplomatic",
            WritingTone::Enthusiastic => "enthusiastic",
            WritingTone::Friendly => "friendly",
            WritingTone::PreferConfident => "prefer_confident",
            WritingTone::PreferDiplomatic => "prefer_diplomatic",
            WritingTone::PreferEnthusiastic => "prefer_enthusiastic",
            WritingTone::PreferFriendly => "prefer_friendly",
        }
    }
}

/// Options for [`crate::Translator::rephrase_text`].
#[derive(Debug, Clone, Default)]
pub struct TextRephraseOptions {
    pub writing_style: Option<WritingStyle>,
    pub tone: Option<WritingTone>,
}

impl TextRephraseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writing_style(mut self, style: WritingStyle) -> Self {
        self.writing_style = Some(style);
        self
    }

    pub fn tone(mut self, tone: WritingTone) -> Self {
        self.tone = Some(tone);
        self
    }
}

/// One rephrased text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResult {
    pub text: String,
    pub detected_source_language: String,
    pub target_language: String,
}

impl WriteResult {
    pub(crate) fn standardized(mut self) -> Self {
        self.detected_source_language = standardize_language_code(&self.detected_source_language);
        self
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WriteResponse {
    pub improvements: Vec<WriteResult>,
}
