//! # deepl-client
//!
//! DeepL 翻译服务的异步 Rust 客户端：带退避重试的请求引擎、文档翻译轮询与术语表校验。
//!
//! Async client for the DeepL translation API.
//!
//! ## Overview
//!
//! The interesting parts are the request engine underneath the plain API calls:
//!
//! - **Retry with backoff**: every logical request is retried on timeouts, 429 and 5xx,
//!   with exponential backoff (1s initial, ×1.6, capped at 120s, ±23% jitter)
//! - **Document workflow**: upload, poll with a server-guided interval, download; failures
//!   carry the [`DocumentHandle`] so a job can be resumed later, even from another process
//! - **Glossary entries**: [`GlossaryEntries`] validates terms and parses TSV strictly, for
//!   single-pair and multilingual glossaries alike
//! - **Typed errors**: every HTTP outcome maps to one [`Error`] variant
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use deepl_client::{TextTranslationOptions, Translator};
//!
//! #[tokio::main]
//! async fn main() -> deepl_client::Result<()> {
//!     let translator = Translator::new("your-auth-key:fx")?;
//!     let results = translator
//!         .translate_text(&["Hello, world!"], None, "de", &TextTranslationOptions::new())
//!         .await?;
//!     println!("{}", results[0].text);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`Translator`], builder, dispatcher and response classification |
//! | [`glossary`] | Glossary entries, metadata and multilingual glossaries |
//! | [`resilience`] | Backoff timer |
//! | [`transport`] | Transport trait and the reqwest implementation |
//! | [`types`] | Documents, text and rephrase results, usage, languages, style rules |
//! | [`error`] | Error type |

pub mod client;
pub mod glossary;
pub mod resilience;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{is_free_account_auth_key, CallStats, CancelHandle, Translator, TranslatorBuilder};
pub use glossary::{
    EntriesFormat, GlossaryEntries, GlossaryInfo, GlossaryLanguagePair,
    MultilingualGlossaryDictionaryEntries, MultilingualGlossaryDictionaryInfo,
    MultilingualGlossaryInfo,
};
pub use types::{
    ConfiguredRules, CustomInstruction, DocumentHandle, DocumentState, DocumentStatus,
    DocumentTranslationOptions, Formality, Language, LanguageType, SentenceSplittingMode,
    StyleRuleInfo, TextRephraseOptions, TextResult, TextTranslationOptions, Usage, UsageDetail,
    WriteResult, WritingStyle, WritingTone,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, ErrorKind};
