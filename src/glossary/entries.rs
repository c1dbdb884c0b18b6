use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::{Error, ErrorContext, Result};

// Literal pattern; compilation cannot fail.
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\n|\r").unwrap());

const TERM_SEPARATOR: char = '\t';

fn trim_term(term: &str) -> &str {
    term.trim_matches(|c| c == ' ' || c == '\t')
}

fn is_forbidden(c: char) -> bool {
    let cp = c as u32;
    cp <= 31 || (128..=159).contains(&cp) || c == '\u{2028}' || c == '\u{2029}'
}

/// Validated list of `(source, target)` term pairs for a glossary.
///
/// Source terms are unique and iteration follows insertion order. Every stored term is
/// trimmed of surrounding spaces and tabs and has passed [`GlossaryEntries::validate_term`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossaryEntries {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl GlossaryEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from pairs, validating every term. Later duplicates overwrite earlier ones.
    pub fn try_from_pairs<I, S, T>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut entries = Self::new();
        for (source, target) in pairs {
            entries.insert(source.as_ref(), target.as_ref())?;
        }
        Ok(entries)
    }

    /// Check a single term. Returns the trimmed term on success.
    pub fn validate_term(term: &str) -> Result<&str> {
        let trimmed = trim_term(term);
        if trimmed.is_empty() {
            return Err(Error::validation_with_context(
                format!("Term '{}' contains no non-whitespace characters", term),
                ErrorContext::new().with_field_path("glossary.term"),
            ));
        }
        if let Some(c) = trimmed.chars().find(|c| is_forbidden(*c)) {
            return Err(Error::validation_with_context(
                format!(
                    "Term '{}' contains invalid character: {:?} (U+{:04X})",
                    term, c, c as u32
                ),
                ErrorContext::new()
                    .with_field_path("glossary.term")
                    .with_details(format!("U+{:04X}", c as u32)),
            ));
        }
        Ok(trimmed)
    }

    /// Add or replace an entry. Returns the previous target term for `source`, if any.
    pub fn insert(&mut self, source: &str, target: &str) -> Result<Option<String>> {
        let source = Self::validate_term(source)?;
        let target = Self::validate_term(target)?.to_string();
        match self.index.get(source) {
            Some(&i) => Ok(Some(std::mem::replace(&mut self.entries[i].1, target))),
            None => {
                self.index.insert(source.to_string(), self.entries.len());
                self.entries.push((source.to_string(), target));
                Ok(None)
            }
        }
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.index
            .get(source)
            .map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, source: &str) -> bool {
        self.index.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }

    /// Parse tab-separated entries, one per line.
    ///
    /// Stricter than [`insert`](Self::insert): a line without exactly one tab, a repeated
    /// source term, or an input with no entries is an [`Error::Format`] naming the
    /// 1-based line. Invalid terms are [`Error::Validation`].
    pub fn from_tsv(tsv: &str) -> Result<Self> {
        let mut entries = Self::new();
        for (i, raw) in LINE_BREAK.split(tsv).enumerate() {
            let line_number = i + 1;
            let line = trim_term(raw);
            if line.is_empty() {
                continue;
            }
            let (source, target) = match line.split_once(TERM_SEPARATOR) {
                None => {
                    return Err(Error::format(
                        format!(
                            "Entry on line {} does not contain a term separator: {}",
                            line_number, line
                        ),
                        Some(line_number),
                    ))
                }
                Some((_, rest)) if rest.contains(TERM_SEPARATOR) => {
                    return Err(Error::format(
                        format!(
                            "Entry on line {} contains more than one term separator: {}",
                            line_number, raw
                        ),
                        Some(line_number),
                    ))
                }
                Some(pair) => pair,
            };
            let source = Self::validate_term(source)?;
            Self::validate_term(target)?;
            if entries.contains(source) {
                return Err(Error::format(
                    format!(
                        "Entry on line {} duplicates source term '{}'",
                        line_number, source
                    ),
                    Some(line_number),
                ));
            }
            entries.insert(source, target)?;
        }
        if entries.is_empty() {
            return Err(Error::format("TSV string contains no valid entries", None));
        }
        Ok(entries)
    }

    /// `source\ttarget` lines joined by `\n`, in insertion order, no trailing newline.
    pub fn to_tsv(&self) -> String {
        self.iter()
            .map(|(s, t)| format!("{}{}{}", s, TERM_SEPARATOR, t))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
