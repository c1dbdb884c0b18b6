use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::client::builder::TranslatorBuilder;
use crate::client::classify::{check_response, RequestContext};
use crate::client::dispatch::RequestDispatcher;
use crate::client::params::text_params;
use crate::client::types::CancelHandle;
use crate::glossary::info::{GlossaryLanguagePair, GlossaryLanguagesResponse};
use crate::transport::{RequestSpec, Transport, TransportResponse};
use crate::types::language::{Language, LanguageType};
use crate::types::style::{StyleRuleInfo, StyleRuleListResponse};
use crate::types::text::{TextResponse, TextResult, TextTranslationOptions};
use crate::types::usage::{Usage, UsageResponse};
use crate::{Error, Result};

pub(crate) const API_VERSION: &str = "v2";
/// Multilingual glossaries and style rules live under v3.
pub(crate) const API_VERSION_V3: &str = "v3";

pub(crate) fn api_path(path: &str) -> String {
    format!("/{}/{}", API_VERSION, path.trim_start_matches('/'))
}

pub(crate) fn api_v3_path(path: &str) -> String {
    format!("/{}/{}", API_VERSION_V3, path.trim_start_matches('/'))
}

/// Client for the translation service.
///
/// Cheap to clone; clones share the underlying connection pool. Every operation is a single
/// future that retries internally and observes the bound [`CancelHandle`].
#[derive(Clone)]
pub struct Translator {
    dispatcher: RequestDispatcher,
    cancel: CancelHandle,
}

impl Translator {
    /// Translator with default settings for `auth_key`.
    pub fn new(auth_key: impl Into<String>) -> Result<Self> {
        TranslatorBuilder::new().auth_key(auth_key).build()
    }

    pub fn builder() -> TranslatorBuilder {
        TranslatorBuilder::new()
    }

    /// Translator over a caller-provided transport.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        max_retries: u32,
        min_timeout: Duration,
    ) -> Self {
        Self::from_dispatcher(RequestDispatcher::new(transport, max_retries, min_timeout))
    }

    pub(crate) fn from_dispatcher(dispatcher: RequestDispatcher) -> Self {
        Self {
            dispatcher,
            cancel: CancelHandle::new(),
        }
    }

    /// A clone whose operations stop with [`Error::Cancelled`] once `cancel` fires.
    pub fn with_cancel(&self, cancel: CancelHandle) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            cancel,
        }
    }

    pub fn cancel_handle(&self) -> &CancelHandle {
        &self.cancel
    }

    #[cfg(test)]
    pub(crate) fn dispatcher(&self) -> &RequestDispatcher {
        &self.dispatcher
    }

    /// Dispatch and classify. Only 2xx responses are returned; their body is unread.
    pub(crate) async fn send(
        &self,
        request: &RequestSpec,
        context: RequestContext,
    ) -> Result<TransportResponse> {
        let (response, stats) = self
            .dispatcher
            .dispatch(request, context, &self.cancel)
            .await?;
        debug!(
            method = %stats.method,
            path = %stats.path,
            status = stats.http_status,
            retry_count = stats.retry_count,
            duration_ms = stats.duration_ms as u64,
            "call completed"
        );
        if response.is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = self.read_text(response).await?;
        check_response(status, &body, context)?;
        Err(Error::Unexpected {
            status,
            message: body,
        })
    }

    pub(crate) async fn read_text(&self, response: TransportResponse) -> Result<String> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
            text = response.text() => text.map_err(Error::interrupted_body),
        }
    }

    pub(crate) async fn send_text(
        &self,
        request: &RequestSpec,
        context: RequestContext,
    ) -> Result<String> {
        let response = self.send(request, context).await?;
        self.read_text(response).await
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: &RequestSpec,
        context: RequestContext,
    ) -> Result<T> {
        let body = self.send_text(request, context).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Translate `texts` into `target_lang`; results are in input order.
    ///
    /// `source_lang = None` lets the service detect the language.
    pub async fn translate_text<S: AsRef<str>>(
        &self,
        texts: &[S],
        source_lang: Option<&str>,
        target_lang: &str,
        options: &TextTranslationOptions,
    ) -> Result<Vec<TextResult>> {
        let params = text_params(texts, source_lang, target_lang, options)?;
        let request = RequestSpec::post(api_path("translate")).params(params);
        let response: TextResponse = self.send_json(&request, RequestContext::DEFAULT).await?;
        Ok(response.translations)
    }

    pub async fn usage(&self) -> Result<Usage> {
        let request = RequestSpec::get(api_path("usage"));
        let response: UsageResponse = self.send_json(&request, RequestContext::DEFAULT).await?;
        Ok(Usage::from(response))
    }

    pub async fn languages(&self, language_type: LanguageType) -> Result<Vec<Language>> {
        let mut request = RequestSpec::post(api_path("languages"));
        if language_type == LanguageType::Target {
            request = request.param("type", "target");
        }
        let languages: Vec<Language> = self.send_json(&request, RequestContext::DEFAULT).await?;
        Ok(languages.into_iter().map(Language::standardized).collect())
    }

    /// Language pairs that glossaries may be created for.
    pub async fn glossary_languages(&self) -> Result<Vec<GlossaryLanguagePair>> {
        let request = RequestSpec::get(api_path("glossary-language-pairs"));
        let response: GlossaryLanguagesResponse =
            self.send_json(&request, RequestContext::DEFAULT).await?;
        Ok(response
            .supported_languages
            .into_iter()
            .map(GlossaryLanguagePair::standardized)
            .collect())
    }

    /// Style rules stored on the account. Without `detailed` the configured rules and
    /// custom instructions are omitted.
    pub async fn style_rules(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
        detailed: Option<bool>,
    ) -> Result<Vec<StyleRuleInfo>> {
        let request = RequestSpec::get(api_v3_path("style_rules"))
            .params(page.map(|p| ("page", p.to_string())))
            .params(page_size.map(|p| ("page_size", p.to_string())))
            .params(detailed.map(|d| ("detailed", d.to_string())));
        let response: StyleRuleListResponse =
            self.send_json(&request, RequestContext::DEFAULT).await?;
        Ok(response.style_rules)
    }
}
