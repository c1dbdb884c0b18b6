use keyring::Entry;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::client::core::Translator;
use crate::client::dispatch::RequestDispatcher;
use crate::transport::{HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};

pub const DEFAULT_SERVER_URL: &str = "https://api.deepl.com";
pub const DEFAULT_SERVER_URL_FREE: &str = "https://api-free.deepl.com";
pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_MIN_TIMEOUT: Duration = Duration::from_secs(10);

const KEYRING_SERVICE: &str = "deepl";
const KEYRING_USER: &str = "auth_key";

/// Free-tier keys carry a `:fx` suffix.
pub fn is_free_account_auth_key(auth_key: &str) -> bool {
    auth_key.trim().ends_with(":fx")
}

/// Builder for [`Translator`].
///
/// Unset values fall back to the environment:
/// - `DEEPL_AUTH_KEY` (after the OS keyring entry `deepl`/`auth_key`)
/// - `DEEPL_SERVER_URL`
/// - `DEEPL_MAX_RETRIES` (default 5)
/// - `DEEPL_TIMEOUT_SECS` (default 10)
/// - `DEEPL_PROXY_URL`
pub struct TranslatorBuilder {
    auth_key: Option<String>,
    server_url: Option<String>,
    max_retries: Option<u32>,
    min_timeout: Option<Duration>,
    proxy_url: Option<String>,
    headers: Vec<(String, String)>,
    app_info: Option<(String, String)>,
    send_platform_info: bool,
    transport: Option<Arc<dyn Transport>>,
}

impl TranslatorBuilder {
    pub fn new() -> Self {
        Self {
            auth_key: None,
            server_url: None,
            max_retries: None,
            min_timeout: None,
            proxy_url: None,
            headers: Vec::new(),
            app_info: None,
            send_platform_info: true,
            transport: None,
        }
    }

    pub fn auth_key(mut self, auth_key: impl Into<String>) -> Self {
        self.auth_key = Some(auth_key.into());
        self
    }

    /// Override the server URL (mock servers, regional endpoints).
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Retries after the first attempt; `0` disables retrying.
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = Some(n);
        self
    }

    /// Lower bound for each attempt's timeout.
    pub fn min_timeout(mut self, timeout: Duration) -> Self {
        self.min_timeout = Some(timeout);
        self
    }

    pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }

    /// Extra header sent with every request. Replaces a default header of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Identify the calling application in the User-Agent.
    pub fn app_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.app_info = Some((name.into(), version.into()));
        self
    }

    pub fn send_platform_info(mut self, enable: bool) -> Self {
        self.send_platform_info = enable;
        self
    }

    /// Use a custom transport instead of the reqwest-based one.
    ///
    /// Server URL, proxy and headers are then the transport's concern.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    fn resolve_auth_key(&self) -> Result<String> {
        let key = self
            .auth_key
            .clone()
            .or_else(|| {
                Entry::new(KEYRING_SERVICE, KEYRING_USER)
                    .ok()
                    .and_then(|entry| entry.get_password().ok())
            })
            .or_else(|| env::var("DEEPL_AUTH_KEY").ok())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "no auth key configured",
                    ErrorContext::new()
                        .with_field_path("auth_key")
                        .with_details("set it on the builder, in the OS keyring or via DEEPL_AUTH_KEY")
                        .with_source("builder"),
                )
            })?;
        let key = key.trim().to_string();
        if key.is_empty() {
            return Err(Error::configuration_with_context(
                "auth key must not be empty",
                ErrorContext::new()
                    .with_field_path("auth_key")
                    .with_source("builder"),
            ));
        }
        Ok(key)
    }

    fn user_agent(&self) -> String {
        let mut ua = format!("deepl-client/{}", env!("CARGO_PKG_VERSION"));
        if self.send_platform_info {
            ua.push_str(&format!(" ({}-{})", env::consts::OS, env::consts::ARCH));
        }
        if let Some((name, version)) = &self.app_info {
            ua.push_str(&format!(" {}/{}", name, version));
        }
        ua
    }

    /// Default headers, with caller headers taking precedence.
    fn headers(&self, auth_key: &str) -> Vec<(String, String)> {
        let mut headers = self.headers.clone();
        let has = |name: &str| headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name));
        let mut defaults = Vec::new();
        if !has("authorization") {
            defaults.push((
                "Authorization".to_string(),
                format!("DeepL-Auth-Key {}", auth_key),
            ));
        }
        if !has("user-agent") {
            defaults.push(("User-Agent".to_string(), self.user_agent()));
        }
        headers.extend(defaults);
        headers
    }

    pub fn build(self) -> Result<Translator> {
        let max_retries = self
            .max_retries
            .or_else(|| {
                env::var("DEEPL_MAX_RETRIES")
                    .ok()
                    .and_then(|s| s.parse::<u32>().ok())
            })
            .unwrap_or(DEFAULT_MAX_RETRIES);
        let min_timeout = self
            .min_timeout
            .or_else(|| {
                env::var("DEEPL_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs)
            })
            .unwrap_or(DEFAULT_MIN_TIMEOUT);

        let transport: Arc<dyn Transport> = match &self.transport {
            Some(transport) => transport.clone(),
            None => {
                let auth_key = self.resolve_auth_key()?;
                let server_url = self
                    .server_url
                    .clone()
                    .or_else(|| env::var("DEEPL_SERVER_URL").ok())
                    .unwrap_or_else(|| {
                        if is_free_account_auth_key(&auth_key) {
                            DEFAULT_SERVER_URL_FREE.to_string()
                        } else {
                            DEFAULT_SERVER_URL.to_string()
                        }
                    });
                let proxy_url = self
                    .proxy_url
                    .clone()
                    .or_else(|| env::var("DEEPL_PROXY_URL").ok());
                debug!(
                    server_url = %server_url,
                    max_retries,
                    min_timeout_ms = min_timeout.as_millis() as u64,
                    proxy = proxy_url.is_some(),
                    "building translator"
                );
                Arc::new(HttpTransport::new(
                    &server_url,
                    &self.headers(&auth_key),
                    proxy_url.as_deref(),
                )?)
            }
        };

        Ok(Translator::from_dispatcher(RequestDispatcher::new(
            transport,
            max_retries,
            min_timeout,
        )))
    }
}

impl Default for TranslatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
