//! HttpTransport trait definition
//!
//! This trait defines how requests reach the network. It allows the gateway
//! logic to be decoupled from the specific HTTP client implementation.

use async_trait::async_trait;

use crate::error::Result;
use crate::request::{HttpRequest, HttpResponse};

/// Trait for executing a single HTTP request
///
/// This trait is implemented by the reqwest adapter and can be mocked for testing.
/// Implementations must not inspect the status code: any response that was
/// received and read completely is `Ok`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request and read the whole response body
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}
