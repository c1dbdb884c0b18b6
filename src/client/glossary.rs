use tracing::info;

use crate::client::classify::RequestContext;
use crate::client::core::{api_path, Translator};
use crate::client::params::glossary_language;
use crate::glossary::entries::GlossaryEntries;
use crate::glossary::info::{EntriesFormat, GlossaryInfo, GlossaryListResponse};
use crate::transport::RequestSpec;
use crate::{Error, ErrorContext, Result};

impl Translator {
    /// Create a glossary from validated entries (sent as TSV).
    pub async fn create_glossary(
        &self,
        name: &str,
        source_lang: &str,
        target_lang: &str,
        entries: &GlossaryEntries,
    ) -> Result<GlossaryInfo> {
        if entries.is_empty() {
            return Err(Error::validation_with_context(
                "glossary entries must not be empty",
                ErrorContext::new().with_field_path("glossary.entries"),
            ));
        }
        self.create_glossary_internal(
            name,
            source_lang,
            target_lang,
            EntriesFormat::Tsv,
            &entries.to_tsv(),
        )
        .await
    }

    /// Create a glossary from CSV text. The CSV is parsed by the service only.
    pub async fn create_glossary_from_csv(
        &self,
        name: &str,
        source_lang: &str,
        target_lang: &str,
        csv: &str,
    ) -> Result<GlossaryInfo> {
        self.create_glossary_internal(name, source_lang, target_lang, EntriesFormat::Csv, csv)
            .await
    }

    async fn create_glossary_internal(
        &self,
        name: &str,
        source_lang: &str,
        target_lang: &str,
        format: EntriesFormat,
        entries: &str,
    ) -> Result<GlossaryInfo> {
        if name.trim().is_empty() {
            return Err(Error::validation_with_context(
                "glossary name must not be empty",
                ErrorContext::new().with_field_path("glossary.name"),
            ));
        }
        let source = glossary_language(source_lang, "source_lang")?;
        let target = glossary_language(target_lang, "target_lang")?;
        let request = RequestSpec::post(api_path("glossaries"))
            .param("name", name)
            .param("source_lang", source)
            .param("target_lang", target)
            .param("entries_format", format.as_str())
            .param("entries", entries);
        let info: GlossaryInfo = self.send_json(&request, RequestContext::DEFAULT).await?;
        info!(
            glossary_id = %info.glossary_id,
            name = %info.name,
            entry_count = info.entry_count,
            "glossary created"
        );
        Ok(info)
    }

    pub async fn glossary(&self, glossary_id: &str) -> Result<GlossaryInfo> {
        let request = RequestSpec::get(api_path(&format!("glossaries/{}", glossary_id)));
        self.send_json(&request, RequestContext::GLOSSARY).await
    }

    pub async fn list_glossaries(&self) -> Result<Vec<GlossaryInfo>> {
        let request = RequestSpec::get(api_path("glossaries"));
        let response: GlossaryListResponse =
            self.send_json(&request, RequestContext::DEFAULT).await?;
        Ok(response.glossaries)
    }

    /// Entries of a stored glossary, parsed with [`GlossaryEntries::from_tsv`].
    pub async fn glossary_entries(&self, glossary_id: &str) -> Result<GlossaryEntries> {
        let request = RequestSpec::get(api_path(&format!("glossaries/{}/entries", glossary_id)));
        let body = self.send_text(&request, RequestContext::GLOSSARY).await?;
        GlossaryEntries::from_tsv(&body)
    }

    pub async fn delete_glossary(&self, glossary_id: &str) -> Result<()> {
        let request = RequestSpec::delete(api_path(&format!("glossaries/{}", glossary_id)));
        self.send(&request, RequestContext::GLOSSARY).await?;
        info!(glossary_id, "glossary deleted");
        Ok(())
    }
}
