//! 术语表模块：经过校验的术语对集合与术语表元数据。
//!
//! # Glossary Module
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`entries`] | [`GlossaryEntries`]: validated term pairs with strict TSV parsing |
//! | [`info`] | Glossary metadata and supported language pairs |
//! | [`multilingual`] | Glossaries with one dictionary per language pair |

pub mod entries;
pub mod info;
pub mod multilingual;

pub use entries::GlossaryEntries;
pub use info::{EntriesFormat, GlossaryInfo, GlossaryLanguagePair};
pub use multilingual::{
    MultilingualGlossaryDictionaryEntries, MultilingualGlossaryDictionaryInfo,
    MultilingualGlossaryInfo,
};
