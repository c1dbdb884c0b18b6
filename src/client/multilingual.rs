//! Multilingual glossaries: one glossary id, one dictionary per language pair.
//!
//! Dictionary entries are [`GlossaryEntries`], so they pass the same term validation and
//! are sent as TSV like single-pair glossaries.

use tracing::info;

use crate::client::classify::RequestContext;
use crate::client::core::{api_v3_path, Translator};
use crate::client::params::{glossary_language, Params};
use crate::glossary::entries::GlossaryEntries;
use crate::glossary::info::EntriesFormat;
use crate::glossary::multilingual::{
    DictionaryEntriesListResponse, MultilingualGlossaryDictionaryEntries,
    MultilingualGlossaryDictionaryInfo, MultilingualGlossaryInfo,
    MultilingualGlossaryListResponse,
};
use crate::transport::RequestSpec;
use crate::{Error, ErrorContext, Result};

fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation_with_context(
            format!("{} must not be empty", field),
            ErrorContext::new().with_field_path(field),
        ));
    }
    Ok(())
}

fn non_empty_entries(entries: &GlossaryEntries, field: &str) -> Result<()> {
    if entries.is_empty() {
        return Err(Error::validation_with_context(
            "glossary entries must not be empty",
            ErrorContext::new().with_field_path(field),
        ));
    }
    Ok(())
}

/// `dictionaries[i].*` form fields for one dictionary.
fn dictionary_params(
    index: usize,
    source_lang: &str,
    target_lang: &str,
    format: EntriesFormat,
    entries: String,
) -> Result<Params> {
    let prefix = format!("dictionaries[{}]", index);
    Ok(vec![
        (
            format!("{}.source_lang", prefix),
            glossary_language(source_lang, "source_lang")?,
        ),
        (
            format!("{}.target_lang", prefix),
            glossary_language(target_lang, "target_lang")?,
        ),
        (format!("{}.entries", prefix), entries),
        (format!("{}.entries_format", prefix), format.as_str().to_string()),
    ])
}

fn glossary_path(glossary_id: &str, rest: &str) -> Result<String> {
    require(glossary_id, "glossary_id")?;
    Ok(api_v3_path(&format!("glossaries/{}{}", glossary_id, rest)))
}

impl Translator {
    /// Create a glossary with one dictionary per entry of `dictionaries`.
    pub async fn create_multilingual_glossary(
        &self,
        name: &str,
        dictionaries: &[MultilingualGlossaryDictionaryEntries],
    ) -> Result<MultilingualGlossaryInfo> {
        require(name, "glossary.name")?;
        if dictionaries.is_empty() {
            return Err(Error::validation_with_context(
                "at least one dictionary is required",
                ErrorContext::new().with_field_path("glossary.dictionaries"),
            ));
        }
        let mut request = RequestSpec::post(api_v3_path("glossaries")).param("name", name);
        for (i, dict) in dictionaries.iter().enumerate() {
            non_empty_entries(&dict.entries, &format!("dictionaries[{}].entries", i))?;
            request = request.params(dictionary_params(
                i,
                &dict.source_lang,
                &dict.target_lang,
                EntriesFormat::Tsv,
                dict.entries.to_tsv(),
            )?);
        }
        let info: MultilingualGlossaryInfo =
            self.send_json(&request, RequestContext::DEFAULT).await?;
        info!(
            glossary_id = %info.glossary_id,
            name = %info.name,
            dictionaries = info.dictionaries.len(),
            "multilingual glossary created"
        );
        Ok(info)
    }

    /// Create a glossary with a single dictionary given as CSV. The CSV is parsed by the
    /// service only.
    pub async fn create_multilingual_glossary_from_csv(
        &self,
        name: &str,
        source_lang: &str,
        target_lang: &str,
        csv: &str,
    ) -> Result<MultilingualGlossaryInfo> {
        require(name, "glossary.name")?;
        require(csv, "entries")?;
        let request = RequestSpec::post(api_v3_path("glossaries"))
            .params(dictionary_params(
                0,
                source_lang,
                target_lang,
                EntriesFormat::Csv,
                csv.to_string(),
            )?)
            .param("name", name);
        let info: MultilingualGlossaryInfo =
            self.send_json(&request, RequestContext::DEFAULT).await?;
        info!(glossary_id = %info.glossary_id, name = %info.name, "multilingual glossary created");
        Ok(info)
    }

    pub async fn multilingual_glossary(&self, glossary_id: &str) -> Result<MultilingualGlossaryInfo> {
        let request = RequestSpec::get(glossary_path(glossary_id, "")?);
        self.send_json(&request, RequestContext::GLOSSARY).await
    }

    pub async fn list_multilingual_glossaries(&self) -> Result<Vec<MultilingualGlossaryInfo>> {
        let request = RequestSpec::get(api_v3_path("glossaries"));
        let response: MultilingualGlossaryListResponse =
            self.send_json(&request, RequestContext::DEFAULT).await?;
        Ok(response.glossaries)
    }

    /// Entries of the dictionary for one language pair.
    pub async fn multilingual_glossary_entries(
        &self,
        glossary_id: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<MultilingualGlossaryDictionaryEntries> {
        let request = RequestSpec::get(glossary_path(glossary_id, "/entries")?)
            .param("source_lang", glossary_language(source_lang, "source_lang")?)
            .param("target_lang", glossary_language(target_lang, "target_lang")?);
        let response: DictionaryEntriesListResponse =
            self.send_json(&request, RequestContext::GLOSSARY).await?;
        match response.dictionaries.into_iter().next() {
            Some(dict) => dict.into_entries(),
            None => Err(Error::GlossaryNotFound {
                message: format!(
                    "glossary {} has no dictionary for {} -> {}",
                    glossary_id, source_lang, target_lang
                ),
            }),
        }
    }

    /// Replace the dictionary for the pair of `dictionary` with its entries.
    pub async fn replace_multilingual_glossary_dictionary(
        &self,
        glossary_id: &str,
        dictionary: &MultilingualGlossaryDictionaryEntries,
    ) -> Result<MultilingualGlossaryDictionaryInfo> {
        non_empty_entries(&dictionary.entries, "entries")?;
        self.replace_dictionary_internal(
            glossary_id,
            &dictionary.source_lang,
            &dictionary.target_lang,
            EntriesFormat::Tsv,
            dictionary.entries.to_tsv(),
        )
        .await
    }

    pub async fn replace_multilingual_glossary_dictionary_from_csv(
        &self,
        glossary_id: &str,
        source_lang: &str,
        target_lang: &str,
        csv: &str,
    ) -> Result<MultilingualGlossaryDictionaryInfo> {
        require(csv, "entries")?;
        self.replace_dictionary_internal(
            glossary_id,
            source_lang,
            target_lang,
            EntriesFormat::Csv,
            csv.to_string(),
        )
        .await
    }

    async fn replace_dictionary_internal(
        &self,
        glossary_id: &str,
        source_lang: &str,
        target_lang: &str,
        format: EntriesFormat,
        entries: String,
    ) -> Result<MultilingualGlossaryDictionaryInfo> {
        let request = RequestSpec::put(glossary_path(glossary_id, "/dictionaries")?)
            .param("source_lang", glossary_language(source_lang, "source_lang")?)
            .param("target_lang", glossary_language(target_lang, "target_lang")?)
            .param("entries", entries)
            .param("entries_format", format.as_str());
        let dict: MultilingualGlossaryDictionaryInfo =
            self.send_json(&request, RequestContext::GLOSSARY).await?;
        info!(
            glossary_id,
            source_lang = %dict.source_lang,
            target_lang = %dict.target_lang,
            entry_count = dict.entry_count,
            "glossary dictionary replaced"
        );
        Ok(dict)
    }

    /// Merge the entries of `dictionary` into the existing dictionary for its pair,
    /// creating the dictionary if the glossary has none for that pair.
    pub async fn update_multilingual_glossary_dictionary(
        &self,
        glossary_id: &str,
        dictionary: &MultilingualGlossaryDictionaryEntries,
    ) -> Result<MultilingualGlossaryInfo> {
        non_empty_entries(&dictionary.entries, "entries")?;
        self.update_dictionary_internal(
            glossary_id,
            &dictionary.source_lang,
            &dictionary.target_lang,
            EntriesFormat::Tsv,
            dictionary.entries.to_tsv(),
        )
        .await
    }

    pub async fn update_multilingual_glossary_dictionary_from_csv(
        &self,
        glossary_id: &str,
        source_lang: &str,
        target_lang: &str,
        csv: &str,
    ) -> Result<MultilingualGlossaryInfo> {
        require(csv, "entries")?;
        self.update_dictionary_internal(
            glossary_id,
            source_lang,
            target_lang,
            EntriesFormat::Csv,
            csv.to_string(),
        )
        .await
    }

    async fn update_dictionary_internal(
        &self,
        glossary_id: &str,
        source_lang: &str,
        target_lang: &str,
        format: EntriesFormat,
        entries: String,
    ) -> Result<MultilingualGlossaryInfo> {
        let request = RequestSpec::patch(glossary_path(glossary_id, "")?).params(
            dictionary_params(0, source_lang, target_lang, format, entries)?,
        );
        self.send_json(&request, RequestContext::GLOSSARY).await
    }

    pub async fn update_multilingual_glossary_name(
        &self,
        glossary_id: &str,
        name: &str,
    ) -> Result<MultilingualGlossaryInfo> {
        require(name, "glossary.name")?;
        let request = RequestSpec::patch(glossary_path(glossary_id, "")?).param("name", name);
        self.send_json(&request, RequestContext::GLOSSARY).await
    }

    pub async fn delete_multilingual_glossary(&self, glossary_id: &str) -> Result<()> {
        let request = RequestSpec::delete(glossary_path(glossary_id, "")?);
        self.send(&request, RequestContext::GLOSSARY).await?;
        info!(glossary_id, "multilingual glossary deleted");
        Ok(())
    }

    /// Remove the dictionary for one language pair; the glossary itself stays.
    pub async fn delete_multilingual_glossary_dictionary(
        &self,
        glossary_id: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<()> {
        let request = RequestSpec::delete(glossary_path(glossary_id, "/dictionaries")?)
            .param("source_lang", glossary_language(source_lang, "source_lang")?)
            .param("target_lang", glossary_language(target_lang, "target_lang")?);
        self.send(&request, RequestContext::GLOSSARY).await?;
        info!(glossary_id, source_lang, target_lang, "glossary dictionary deleted");
        Ok(())
    }
}
