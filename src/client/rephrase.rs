use tracing::debug;

use crate::client::classify::RequestContext;
use crate::client::core::{api_path, Translator};
use crate::client::params::rephrase_params;
use crate::transport::RequestSpec;
use crate::types::write::{TextRephraseOptions, WriteResponse, WriteResult};
use crate::Result;

impl Translator {
    /// Improve `texts`, optionally converting them into `target_lang`.
    ///
    /// Results are in input order.
    pub async fn rephrase_text<S: AsRef<str>>(
        &self,
        texts: &[S],
        target_lang: Option<&str>,
        options: &TextRephraseOptions,
    ) -> Result<Vec<WriteResult>> {
        let params = rephrase_params(texts, target_lang, options)?;
        let request = RequestSpec::post(api_path("write/rephrase")).params(params);
        let response: WriteResponse = self.send_json(&request, RequestContext::DEFAULT).await?;
        debug!(texts = texts.len(), "texts rephrased");
        Ok(response
            .improvements
            .into_iter()
            .map(WriteResult::standardized)
            .collect())
    }
}
