//! Document translation workflow: upload, poll until terminal, download.
//!
//! A [`DocumentHandle`] is all the state the workflow needs after the upload, so a job can
//! be resumed from a handle rebuilt in another process.

use bytes::Bytes;
use std::path::Path;
use tokio::io::AsyncWrite;
use tracing::{debug, info, warn};

use crate::client::classify::RequestContext;
use crate::client::core::{api_path, Translator};
use crate::client::params::document_params;
use crate::transport::{FilePayload, RequestSpec};
use crate::types::document::{
    poll_interval, DocumentHandle, DocumentStatus, DocumentTranslationOptions,
};
use crate::{Error, Result};

impl Translator {
    /// Upload a document for translation. The job starts queued on the server.
    pub async fn upload_document(
        &self,
        content: impl Into<Bytes>,
        file_name: &str,
        source_lang: Option<&str>,
        target_lang: &str,
        options: &DocumentTranslationOptions,
    ) -> Result<DocumentHandle> {
        let params = document_params(source_lang, target_lang, options)?;
        let request = RequestSpec::post(api_path("document"))
            .params(params)
            .file(FilePayload::new(file_name, content));
        let handle: DocumentHandle = self.send_json(&request, RequestContext::DEFAULT).await?;
        debug!(document_id = %handle.document_id, file_name, "document uploaded");
        Ok(handle)
    }

    /// Observe the job once.
    pub async fn document_status(&self, handle: &DocumentHandle) -> Result<DocumentStatus> {
        let request = RequestSpec::post(api_path(&format!("document/{}", handle.document_id)))
            .param("document_key", handle.document_key.as_str());
        self.send_json(&request, RequestContext::DEFAULT).await
    }

    /// Poll until the job is terminal.
    ///
    /// Fails with [`Error::DocumentFailed`] if the server reports an error state.
    pub async fn wait_until_done(&self, handle: &DocumentHandle) -> Result<DocumentStatus> {
        loop {
            let status = self.document_status(handle).await?;
            if !status.ok() {
                let message = status
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "Unknown error".to_string());
                warn!(document_id = %handle.document_id, error = %message, "document translation failed");
                return Err(Error::DocumentFailed {
                    document_id: handle.document_id.clone(),
                    message,
                });
            }
            if status.done() {
                return Ok(status);
            }
            let wait = poll_interval(status.seconds_remaining);
            debug!(
                document_id = %handle.document_id,
                state = ?status.status,
                seconds_remaining = ?status.seconds_remaining,
                wait_ms = wait.as_millis() as u64,
                "document not done, polling again"
            );
            self.cancel_handle().sleep(wait).await?;
        }
    }

    /// Stream the translated document into `sink`. Returns the number of bytes written.
    ///
    /// Before the job is done this fails with [`Error::DocumentNotReady`]; it is not
    /// retried here.
    ///
    /// If the body fails midway, `sink` keeps the bytes received so far and the error is a
    /// non-retryable [`Error::Connection`]. Download again into a fresh sink.
    /// [`Self::download_document_to_file`] removes the partial file itself.
    pub async fn download_document<W>(&self, handle: &DocumentHandle, sink: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let request = RequestSpec::post(api_path(&format!(
            "document/{}/result",
            handle.document_id
        )))
        .param("document_key", handle.document_key.as_str());
        let response = self.send(&request, RequestContext::DOCUMENT_DOWNLOAD).await?;
        let written = tokio::select! {
            biased;
            _ = self.cancel_handle().cancelled() => return Err(Error::Cancelled),
            written = response.copy_to(sink) => written?,
        };
        debug!(document_id = %handle.document_id, bytes = written, "document downloaded");
        Ok(written)
    }

    /// Download into a new file at `path`.
    ///
    /// Refuses to overwrite an existing file; a partially written file is removed on failure.
    pub async fn download_document_to_file(
        &self,
        handle: &DocumentHandle,
        path: impl AsRef<Path>,
    ) -> Result<u64> {
        let path = path.as_ref();
        let mut file = create_new_file(path).await?;
        match self.download_document(handle, &mut file).await {
            Ok(written) => Ok(written),
            Err(e) => {
                drop(file);
                remove_partial(path).await;
                Err(e)
            }
        }
    }

    /// Upload, wait and download in one call.
    ///
    /// Every failure is an [`Error::DocumentTranslation`]; once the upload has succeeded it
    /// carries the handle so the caller can resume with [`Self::wait_until_done`] and
    /// [`Self::download_document`] without uploading again.
    pub async fn translate_document<W>(
        &self,
        content: impl Into<Bytes>,
        file_name: &str,
        sink: &mut W,
        source_lang: Option<&str>,
        target_lang: &str,
        options: &DocumentTranslationOptions,
    ) -> Result<DocumentStatus>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let handle = self
            .upload_document(content, file_name, source_lang, target_lang, options)
            .await
            .map_err(|e| wrap_failure(e, None))?;

        let result = async {
            let status = self.wait_until_done(&handle).await?;
            self.download_document(&handle, sink).await?;
            Ok::<_, Error>(status)
        }
        .await;

        match result {
            Ok(status) => {
                info!(
                    document_id = %handle.document_id,
                    file_name,
                    billed_characters = ?status.billed_characters,
                    "document translated"
                );
                Ok(status)
            }
            Err(e) => Err(wrap_failure(e, Some(handle))),
        }
    }

    /// [`translate_document`](Self::translate_document) between two files.
    ///
    /// The output file must not exist yet; it is removed again if translation fails.
    pub async fn translate_document_file(
        &self,
        input_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
        source_lang: Option<&str>,
        target_lang: &str,
        options: &DocumentTranslationOptions,
    ) -> Result<DocumentStatus> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();
        let file_name = input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let content = tokio::fs::read(input_path).await?;

        let mut output = create_new_file(output_path).await?;
        let result = self
            .translate_document(
                content,
                &file_name,
                &mut output,
                source_lang,
                target_lang,
                options,
            )
            .await;
        if result.is_err() {
            drop(output);
            remove_partial(output_path).await;
        }
        result
    }
}

fn wrap_failure(source: Error, handle: Option<DocumentHandle>) -> Error {
    Error::DocumentTranslation {
        message: source.to_string(),
        handle,
        source: Box::new(source),
    }
}

async fn create_new_file(path: &Path) -> Result<tokio::fs::File> {
    tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(Error::from)
}

async fn remove_partial(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!(path = %path.display(), error = %e, "failed to remove partial output file");
    }
}
