//! Mock HTTP server setup for integration tests

use deepl_client::Translator;
use mockito::{Mock, Server, ServerGuard};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub const AUTH_KEY: &str = "test-key";

/// Route library logs to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        init_tracing();
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Translator pointed at the mock server, with retries disabled.
    pub fn translator(&self) -> Translator {
        self.translator_with_retries(0)
    }

    pub fn translator_with_retries(&self, max_retries: u32) -> Translator {
        Translator::builder()
            .auth_key(AUTH_KEY)
            .server_url(&self.base_url)
            .max_retries(max_retries)
            .min_timeout(Duration::from_secs(5))
            .build()
            .expect("translator")
    }

    /// Create a mock answering with a JSON body
    pub async fn mock_json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}
