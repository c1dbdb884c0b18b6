//! Request parameter construction and local argument checks.
//!
//! Everything here runs before any request is issued; failures are
//! [`Error::Validation`] and never reach the dispatcher.

use std::collections::BTreeMap;

use crate::types::document::DocumentTranslationOptions;
use crate::types::language::{remove_regional_variant, standardize_language_code};
use crate::types::text::{Formality, TextTranslationOptions};
use crate::types::write::TextRephraseOptions;
use crate::{Error, ErrorContext, Result};

pub(crate) type Params = Vec<(String, String)>;

fn push(params: &mut Params, key: &str, value: impl Into<String>) {
    params.push((key.to_string(), value.into()));
}

/// Normalized `(source, target)` after rejecting empty and ambiguous codes.
pub(crate) fn check_languages(
    source_lang: Option<&str>,
    target_lang: &str,
) -> Result<(Option<String>, String)> {
    if matches!(source_lang, Some(s) if s.is_empty()) {
        return Err(Error::validation_with_context(
            "source language must be absent or non-empty",
            ErrorContext::new().with_field_path("source_lang"),
        ));
    }
    if target_lang.is_empty() {
        return Err(Error::validation_with_context(
            "target language must not be empty",
            ErrorContext::new().with_field_path("target_lang"),
        ));
    }
    let target = standardize_language_code(target_lang);
    match target.as_str() {
        "en" => {
            return Err(Error::validation_with_context(
                "target language \"en\" is ambiguous, use \"en-GB\" or \"en-US\" instead",
                ErrorContext::new().with_field_path("target_lang"),
            ))
        }
        "pt" => {
            return Err(Error::validation_with_context(
                "target language \"pt\" is ambiguous, use \"pt-PT\" or \"pt-BR\" instead",
                ErrorContext::new().with_field_path("target_lang"),
            ))
        }
        _ => {}
    }
    Ok((source_lang.map(standardize_language_code), target))
}

/// A glossary language code: non-empty, reduced to its base language (`EN-gb` → `en`).
///
/// Glossaries are defined per base language, so `en` and `pt` are valid targets here.
pub(crate) fn glossary_language(code: &str, field: &str) -> Result<String> {
    if code.trim().is_empty() {
        return Err(Error::validation_with_context(
            format!("{} must not be empty", field),
            ErrorContext::new().with_field_path(field),
        ));
    }
    Ok(remove_regional_variant(code.trim()))
}

fn common_params(
    source_lang: Option<&str>,
    target_lang: &str,
    formality: Option<Formality>,
    glossary_id: Option<&str>,
) -> Result<Params> {
    let (source, target) = check_languages(source_lang, target_lang)?;
    let mut params = Params::new();
    if let Some(source) = &source {
        push(&mut params, "source_lang", source.as_str());
    }
    push(&mut params, "target_lang", target);
    if let Some(formality) = formality {
        push(&mut params, "formality", formality.as_str());
    }
    if let Some(glossary_id) = glossary_id {
        if source.is_none() {
            return Err(Error::validation_with_context(
                "a source language is required when using a glossary",
                ErrorContext::new()
                    .with_field_path("source_lang")
                    .with_details(format!("glossary_id = {}", glossary_id)),
            ));
        }
        push(&mut params, "glossary_id", glossary_id);
    }
    Ok(params)
}

/// Extra parameters replace every same-named parameter built so far.
fn apply_extra(params: &mut Params, extra: &BTreeMap<String, String>) {
    if extra.is_empty() {
        return;
    }
    params.retain(|(k, _)| !extra.contains_key(k));
    params.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
}

pub(crate) fn text_params<S: AsRef<str>>(
    texts: &[S],
    source_lang: Option<&str>,
    target_lang: &str,
    options: &TextTranslationOptions,
) -> Result<Params> {
    if texts.is_empty() {
        return Err(Error::validation_with_context(
            "at least one text is required",
            ErrorContext::new().with_field_path("text"),
        ));
    }
    let mut params = common_params(
        source_lang,
        target_lang,
        options.formality,
        options.glossary_id.as_deref(),
    )?;
    push_texts(&mut params, texts)?;
    push(&mut params, "show_billed_characters", "1");

    if let Some(mode) = options.sentence_splitting_mode {
        push(&mut params, "split_sentences", mode.as_str());
    }
    if options.preserve_formatting {
        push(&mut params, "preserve_formatting", "1");
    }
    if let Some(context) = &options.context {
        push(&mut params, "context", context.as_str());
    }
    if let Some(model_type) = &options.model_type {
        push(&mut params, "model_type", model_type.as_str());
    }
    if let Some(tag_handling) = &options.tag_handling {
        push(&mut params, "tag_handling", tag_handling.as_str());
    }
    if let Some(version) = &options.tag_handling_version {
        push(&mut params, "tag_handling_version", version.as_str());
    }
    if !options.outline_detection {
        push(&mut params, "outline_detection", "0");
    }
    for (key, tags) in [
        ("splitting_tags", &options.splitting_tags),
        ("non_splitting_tags", &options.non_splitting_tags),
        ("ignore_tags", &options.ignore_tags),
    ] {
        if !tags.is_empty() {
            push(&mut params, key, tags.join(","));
        }
    }
    if let Some(style_id) = &options.style_id {
        push(&mut params, "style_id", style_id.as_str());
    }
    for instruction in &options.custom_instructions {
        push(&mut params, "custom_instructions", instruction.as_str());
    }
    apply_extra(&mut params, &options.extra_body_parameters);
    Ok(params)
}

fn push_texts<S: AsRef<str>>(params: &mut Params, texts: &[S]) -> Result<()> {
    if texts.is_empty() {
        return Err(Error::validation_with_context(
            "at least one text is required",
            ErrorContext::new().with_field_path("text"),
        ));
    }
    for (i, text) in texts.iter().enumerate() {
        let text = text.as_ref();
        if text.is_empty() {
            return Err(Error::validation_with_context(
                "text must not be empty",
                ErrorContext::new().with_field_path(format!("text[{}]", i)),
            ));
        }
        push(params, "text", text);
    }
    Ok(())
}

pub(crate) fn rephrase_params<S: AsRef<str>>(
    texts: &[S],
    target_lang: Option<&str>,
    options: &TextRephraseOptions,
) -> Result<Params> {
    let mut params = Params::new();
    if let Some(target_lang) = target_lang {
        let (_, target) = check_languages(None, target_lang)?;
        push(&mut params, "target_lang", target);
    }
    if let Some(style) = options.writing_style {
        push(&mut params, "writing_style", style.as_str());
    }
    if let Some(tone) = options.tone {
        push(&mut params, "tone", tone.as_str());
    }
    push_texts(&mut params, texts)?;
    Ok(params)
}

pub(crate) fn document_params(
    source_lang: Option<&str>,
    target_lang: &str,
    options: &DocumentTranslationOptions,
) -> Result<Params> {
    let mut params = common_params(
        source_lang,
        target_lang,
        options.formality,
        options.glossary_id.as_deref(),
    )?;
    apply_extra(&mut params, &options.extra_body_parameters);
    Ok(params)
}
