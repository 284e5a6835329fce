//! reqwest transport implementation
//!
//! Wraps reqwest and implements the HttpTransport trait from s3p-core.

use async_trait::async_trait;

use s3p_core::{Error, HttpRequest, HttpResponse, HttpTransport, Result};

/// reqwest client wrapper
///
/// No timeout is configured: a request waits as long as the connection stays up.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a new transport with a default reqwest client
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("s3p/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { inner: client })
    }

    /// Translate a transport-agnostic request into a reqwest one
    pub fn build_request(&self, request: HttpRequest) -> Result<reqwest::Request> {
        let mut builder = self
            .inner
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        builder.build().map_err(|e| Error::Network(e.to_string()))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let request = self.build_request(request)?;

        let response = self
            .inner
            .execute(request)
            .await
            .map_err(|e| Error::Network(format!("Error executing request: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("Error reading response body: {e}")))?
            .to_vec();

        tracing::trace!(status, bytes = body.len(), "response body read");
        Ok(HttpResponse { status, body })
    }
}
