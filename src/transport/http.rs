use super::{with_read_timeout, RequestSpec, Transport, TransportError, TransportResponse};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Proxy;
use std::time::Duration;
use tracing::debug;
use url::Url;
use uuid::Uuid;

/// reqwest-backed [`Transport`].
///
/// Fixed headers (`Authorization`, `User-Agent`, caller extras) are injected once here.
///
/// The per-attempt timeout from the dispatcher bounds connecting plus receiving the response
/// head, and then every gap between body chunks. A long download that keeps delivering data
/// is never cut off.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    headers: HeaderMap,
}

impl HttpTransport {
    pub fn new(
        base_url: &str,
        headers: &[(String, String)],
        proxy_url: Option<&str>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid server URL: {}", e),
                ErrorContext::new()
                    .with_field_path("server_url")
                    .with_details(base_url)
                    .with_source("http_transport"),
            )
        })?;

        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid header name: {}", e),
                    ErrorContext::new()
                        .with_field_path("headers")
                        .with_details(name.clone())
                        .with_source("http_transport"),
                )
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid header value: {}", e),
                    ErrorContext::new()
                        .with_field_path("headers")
                        .with_details(name.to_string())
                        .with_source("http_transport"),
                )
            })?;
            header_map.insert(name, value);
        }

        let mut builder = reqwest::Client::builder()
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .http2_adaptive_window(true);

        if let Some(proxy_url) = proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    ErrorContext::new()
                        .with_field_path("proxy_url")
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::from(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url,
            headers: header_map,
        })
    }

    fn url_for(&self, path: &str) -> std::result::Result<Url, TransportError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}{}", base, path))
            .map_err(|e| TransportError::Other(format!("invalid request URL: {}", e)))
    }

    fn build_request(
        &self,
        request: &RequestSpec,
    ) -> std::result::Result<reqwest::RequestBuilder, TransportError> {
        let url = self.url_for(request.path())?;
        let mut req = self
            .client
            .request(request.method().clone(), url)
            .headers(self.headers.clone())
            // Our own correlation id; the service ignores it but logs can use it.
            .header("x-client-request-id", Uuid::new_v4().to_string());

        if let Some(file) = request.file_payload() {
            let part = Part::bytes(file.content.to_vec())
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)
                .map_err(TransportError::Http)?;
            let mut form = Form::new().part("file", part);
            for (k, v) in request.param_list() {
                form = form.text(k.clone(), v.clone());
            }
            req = req.multipart(form);
        } else if !request.param_list().is_empty() {
            req = if request.params_in_query() {
                req.query(request.param_list())
            } else {
                req.form(request.param_list())
            };
        }

        Ok(req)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: &RequestSpec,
        timeout: Duration,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let req = self.build_request(request)?;
        debug!(
            method = %request.method(),
            path = request.path(),
            timeout_ms = timeout.as_millis() as u64,
            "sending request"
        );

        let resp = match tokio::time::timeout(timeout, req.send()).await {
            Ok(resp) => resp.map_err(map_reqwest_error)?,
            Err(_) => {
                return Err(TransportError::Timeout(format!(
                    "no response within {} ms",
                    timeout.as_millis()
                )))
            }
        };

        let status = resp.status().as_u16();
        let body = resp.bytes_stream().map_err(map_reqwest_error).boxed();
        Ok(TransportResponse::new(status, with_read_timeout(body, timeout)))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else {
        TransportError::Http(e)
    }
}
