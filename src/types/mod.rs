//! 类型模块：文档、文本、用量与语言的数据对象。
//!
//! # Types Module
//!
//! Plain value holders exchanged with the service. They carry no retry or state-machine
//! logic; that lives in [`crate::client`].
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`document`] | Document handle, status, poll interval and upload options |
//! | [`text`] | Text translation options and results |
//! | [`usage`] | Account usage counters |
//! | [`language`] | Supported languages and code normalization |
//! | [`write`] | Rephrase options and results |
//! | [`style`] | Style rules |

pub mod document;
pub mod language;
pub mod style;
pub mod text;
pub mod usage;
pub mod write;

pub use document::{DocumentHandle, DocumentState, DocumentStatus, DocumentTranslationOptions};
pub use language::{Language, LanguageType};
pub use text::{Formality, SentenceSplittingMode, TextResult, TextTranslationOptions};
pub use style::{ConfiguredRules, CustomInstruction, StyleRuleInfo};
pub use usage::{Usage, UsageDetail};
pub use write::{TextRephraseOptions, WriteResult, WritingStyle, WritingTone};
