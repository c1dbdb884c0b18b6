use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::style::StyleRuleInfo;

/// Desired formality of the translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formality {
    Default,
    Less,
    More,
    PreferLess,
    PreferMore,
}

impl Formality {
    pub fn as_str(self) -> &'static str {
        match self {
            Formality::Default => "default",
            Formality::Less => "less",
            Formality::More => "more",
            Formality::PreferLess => "prefer_less",
            Formality::PreferMore => "prefer_more",
        }
    }
}

/// How the input is split into sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceSplittingMode {
    /// Split on punctuation and newlines (service default).
    All,
    Off,
    /// Split on punctuation only.
    NoNewlines,
}

impl SentenceSplittingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SentenceSplittingMode::All => "1",
            SentenceSplittingMode::Off => "0",
            SentenceSplittingMode::NoNewlines => "nonewlines",
        }
    }
}

/// Options for text translation.
#[derive(Debug, Clone)]
pub struct TextTranslationOptions {
    pub formality: Option<Formality>,
    pub glossary_id: Option<String>,
    pub sentence_splitting_mode: Option<SentenceSplittingMode>,
    pub preserve_formatting: bool,
    pub context: Option<String>,
    pub model_type: Option<String>,
    pub tag_handling: Option<String>,
    pub tag_handling_version: Option<String>,
    pub outline_detection: bool,
    pub splitting_tags: Vec<String>,
    pub non_splitting_tags: Vec<String>,
    pub ignore_tags: Vec<String>,
    pub style_id: Option<String>,
    pub custom_instructions: Vec<String>,
    pub extra_body_parameters: BTreeMap<String, String>,
}

impl Default for TextTranslationOptions {
    fn default() -> Self {
        Self {
            formality: None,
            glossary_id: None,
            sentence_splitting_mode: None,
            preserve_formatting: false,
            context: None,
            model_type: None,
            tag_handling: None,
            tag_handling_version: None,
            outline_detection: true,
            splitting_tags: Vec::new(),
            non_splitting_tags: Vec::new(),
            ignore_tags: Vec::new(),
            style_id: None,
            custom_instructions: Vec::new(),
            extra_body_parameters: BTreeMap::new(),
        }
    }
}

impl TextTranslationOptions {
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

    pub fn sentence_splitting_mode(mut self, mode: SentenceSplittingMode) -> Self {
        self.sentence_splitting_mode = Some(mode);
        self
    }

    pub fn preserve_formatting(mut self, enable: bool) -> Self {
        self.preserve_formatting = enable;
        self
    }

    /// Extra text that influences the translation but is not translated itself.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn model_type(mut self, model_type: impl Into<String>) -> Self {
        self.model_type = Some(model_type.into());
        self
    }

    /// `"xml"` or `"html"`.
    pub fn tag_handling(mut self, tag_handling: impl Into<String>) -> Self {
        self.tag_handling = Some(tag_handling.into());
        self
    }

    pub fn tag_handling_version(mut self, version: impl Into<String>) -> Self {
        self.tag_handling_version = Some(version.into());
        self
    }

    pub fn outline_detection(mut self, enable: bool) -> Self {
        self.outline_detection = enable;
        self
    }

    pub fn splitting_tags(mut self, tags: Vec<String>) -> Self {
        self.splitting_tags = tags;
        self
    }

    pub fn non_splitting_tags(mut self, tags: Vec<String>) -> Self {
        self.non_splitting_tags = tags;
        self
    }

    pub fn ignore_tags(mut self, tags: Vec<String>) -> Self {
        self.ignore_tags = tags;
        self
    }

    pub fn style_id(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }

    /// Apply a stored style rule (see [`crate::Translator::style_rules`]).
    pub fn style_rule(self, rule: &StyleRuleInfo) -> Self {
        self.style_id(rule.style_id.clone())
    }

    /// Add one free-form instruction; may be called repeatedly.
    pub fn custom_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.custom_instructions.push(instruction.into());
        self
    }

    pub fn extra_body_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_body_parameters.insert(key.into(), value.into());
        self
    }
}

/// One translated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResult {
    pub text: String,
    pub detected_source_language: String,
    #[serde(default)]
    pub billed_characters: Option<u64>,
    #[serde(default)]
    pub model_type_used: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextResponse {
    pub translations: Vec<TextResult>,
}
