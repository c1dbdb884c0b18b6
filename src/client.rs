//! Translator client for the translation service.
//!
//! Keep the public surface small: [`Translator`] plus its builder. Request mechanics are
//! split into submodules under `src/client/`.

pub mod builder;
pub mod classify;
pub mod core;
pub mod dispatch;
mod document;
mod glossary;
mod multilingual;
mod params;
mod rephrase;
pub mod types;

pub use builder::{is_free_account_auth_key, TranslatorBuilder};
pub use classify::RequestContext;
pub use core::Translator;
pub use dispatch::RequestDispatcher;
pub use types::{CallStats, CancelHandle};
