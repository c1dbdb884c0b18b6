//! 传输层：HTTP 请求描述、响应流与可替换的传输抽象。
//!
//! # Transport Module
//!
//! The request engine never talks to reqwest directly; it drives a [`Transport`].
//! One call to [`Transport::send`] is exactly one attempt: no retries, no classification.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RequestSpec`] | Method, relative path, ordered parameters, optional file payload |
//! | [`TransportResponse`] | Status code plus a streaming body |
//! | [`with_read_timeout`] | Inactivity limit between body chunks |
//! | [`TransportError`] | Failure before a response was obtained, tagged retryable for timeouts |
//! | [`HttpTransport`] | reqwest implementation |

pub mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use std::fmt;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub use reqwest::Method;

/// Binary payload sent as the `file` part of a multipart upload.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub file_name: String,
    pub content: Bytes,
    pub content_type: String,
}

impl FilePayload {
    /// Build a payload whose content type is inferred from the file name.
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content: content.into(),
            content_type,
        }
    }
}

/// Content type for a document, derived from its extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pdf" => "application/pdf",
        "htm" | "html" => "text/html",
        "txt" => "text/plain",
        "xlf" | "xliff" => "application/xliff+xml",
        "srt" => "application/x-subrip",
        _ => "application/octet-stream",
    }
}

/// Immutable description of one logical request.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    path: String,
    params: Vec<(String, String)>,
    file: Option<FilePayload>,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            file: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Parameters of a DELETE travel in the query string, like those of a GET.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Whether the parameters belong in the query string rather than a form body.
    pub fn params_in_query(&self) -> bool {
        self.method == Method::GET || self.method == Method::DELETE
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn file(mut self, payload: FilePayload) -> Self {
        self.file = Some(payload);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn param_list(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn file_payload(&self) -> Option<&FilePayload> {
        self.file.as_ref()
    }

    /// First value of the named parameter.
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Streaming response body. Dropping it releases the underlying connection.
pub type BodyStream = BoxStream<'static, std::result::Result<Bytes, TransportError>>;

/// Fail `body` with [`TransportError::Timeout`] once no chunk arrives within `idle`.
///
/// The limit applies between chunks, not to the whole body. The stream ends after its
/// first error.
pub fn with_read_timeout(body: BodyStream, idle: Duration) -> BodyStream {
    stream::unfold(Some(body), move |state| async move {
        let mut body = state?;
        match tokio::time::timeout(idle, body.next()).await {
            Ok(Some(Ok(chunk))) => Some((Ok(chunk), Some(body))),
            Ok(Some(Err(e))) => Some((Err(e), None)),
            Ok(None) => None,
            Err(_) => Some((
                Err(TransportError::Timeout(format!(
                    "no data received for {} ms",
                    idle.as_millis()
                ))),
                None,
            )),
        }
    })
    .boxed()
}

/// Status code and body of a completed HTTP exchange.
pub struct TransportResponse {
    status: u16,
    body: BodyStream,
}

impl TransportResponse {
    pub fn new(status: u16, body: BodyStream) -> Self {
        Self { status, body }
    }

    /// Response with an in-memory body.
    pub fn from_bytes(status: u16, body: impl Into<Bytes>) -> Self {
        let body: Bytes = body.into();
        Self::new(status, stream::once(async move { Ok(body) }).boxed())
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Read the whole body into memory.
    pub async fn bytes(mut self) -> std::result::Result<Bytes, TransportError> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }

    pub async fn text(self) -> std::result::Result<String, TransportError> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Stream the body into `sink`, returning the number of bytes written.
    ///
    /// On error the sink keeps whatever was written before the failure. Body failures are
    /// reported as non-retryable (see [`crate::Error::interrupted_body`]).
    pub async fn copy_to<W>(mut self, sink: &mut W) -> crate::Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut written: u64 = 0;
        while let Some(chunk) = self.body.next().await {
            let chunk = chunk.map_err(crate::Error::interrupted_body)?;
            sink.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        sink.flush().await?;
        Ok(written)
    }
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// One attempt against the remote service.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: &RequestSpec,
        timeout: Duration,
    ) -> std::result::Result<TransportResponse, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Only timeouts are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Timeout(_) => true,
            TransportError::Http(e) => e.is_timeout(),
            TransportError::Other(_) => false,
        }
    }
}
