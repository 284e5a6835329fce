//! API gateway client
//!
//! Builds the requests for the four storage operations and routes get/put
//! through a presigned URL when asked to. Every request to the gateway carries
//! the `x-api-key` header; requests to a presigned URL never do, since the URL
//! itself carries the authorization.
//!
//! Status codes are not inspected. A response of any status counts as success
//! unless the transport fails or a presigned URL payload cannot be decoded.

use std::fmt;

use http::Method;
use serde::Deserialize;
use url::Url;

use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::request::{API_KEY_HEADER, HttpRequest, HttpResponse};
use crate::traits::HttpTransport;

/// An object addressed by bucket and key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// How object data is transferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferMode {
    /// Data goes through the gateway itself
    #[default]
    Direct,
    /// Data goes straight to storage through a presigned URL
    Presigned,
}

impl TransferMode {
    pub const fn from_flag(presigned: bool) -> Self {
        if presigned {
            TransferMode::Presigned
        } else {
            TransferMode::Direct
        }
    }
}

/// Gateway reply to a `?presigned=true` request
#[derive(Debug, Clone, Deserialize)]
pub struct PresignedUrlResponse {
    pub url: String,
}

/// Client for the storage API gateway
pub struct Gateway<T> {
    transport: T,
    credentials: Credentials,
}

impl<T: HttpTransport> Gateway<T> {
    pub fn new(transport: T, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// List buckets. The body is returned as-is, without parsing.
    pub async fn list_buckets(&self) -> Result<Vec<u8>> {
        let url = self.endpoint(&["s3", "list"])?;
        let response = self.send(self.authenticated(Method::GET, url)).await?;
        Ok(response.body)
    }

    /// Ask the gateway for a presigned URL for `object`
    pub async fn presigned_url(&self, object: &ObjectRef) -> Result<Url> {
        let url = self.object_url(object, TransferMode::Presigned)?;
        let response = self.send(self.authenticated(Method::GET, url)).await?;

        let presigned: PresignedUrlResponse = serde_json::from_slice(&response.body)?;
        Ok(Url::parse(&presigned.url)?)
    }

    /// Download an object's content
    pub async fn get_object(&self, object: &ObjectRef, mode: TransferMode) -> Result<Vec<u8>> {
        let response = match mode {
            TransferMode::Direct => {
                let url = self.object_url(object, mode)?;
                self.send(self.authenticated(Method::GET, url)).await?
            }
            TransferMode::Presigned => {
                let url = self.presigned_url(object).await?;
                self.send(HttpRequest::new(Method::GET, url)).await?
            }
        };

        Ok(response.body)
    }

    /// Upload `data` as the object's content
    pub async fn put_object(
        &self,
        object: &ObjectRef,
        data: Vec<u8>,
        mode: TransferMode,
    ) -> Result<()> {
        let request = match mode {
            TransferMode::Direct => {
                let url = self.object_url(object, mode)?;
                self.authenticated(Method::PUT, url)
            }
            TransferMode::Presigned => {
                let url = self.presigned_url(object).await?;
                HttpRequest::new(Method::PUT, url)
            }
        };

        self.send(request.body(data)).await?;
        Ok(())
    }

    /// Delete an object
    pub async fn delete_object(&self, object: &ObjectRef) -> Result<()> {
        let url = self.object_url(object, TransferMode::Direct)?;
        self.send(self.authenticated(Method::DELETE, url)).await?;
        Ok(())
    }

    fn authenticated(&self, method: Method, url: Url) -> HttpRequest {
        HttpRequest::new(method, url).header(API_KEY_HEADER, self.credentials.api_key().clone())
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(
            method = %request.method,
            url = %request.redacted_url(),
            authenticated = request.header_value(API_KEY_HEADER).is_some(),
            "sending request"
        );

        let response = self.transport.send(request).await?;

        tracing::debug!(
            status = response.status,
            bytes = response.body.len(),
            "received response"
        );
        Ok(response)
    }

    /// `{apiURL}/s3/{bucket}/{key}`, with `?presigned=true` in presigned mode
    ///
    /// Dot segments are refused: the URL parser would resolve them and the
    /// request would land on a different object or route.
    fn object_url(&self, object: &ObjectRef, mode: TransferMode) -> Result<Url> {
        let mut segments = vec!["s3", object.bucket.as_str()];
        segments.extend(object.key.split('/'));
        if segments[1..].iter().any(|s| matches!(*s, "." | "..")) {
            return Err(Error::InvalidKey(object.to_string()));
        }

        let mut url = self.endpoint(&segments)?;
        if mode == TransferMode::Presigned {
            url.query_pairs_mut().append_pair("presigned", "true");
        }
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let base = self.credentials.api_url();
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("API URL cannot be a base: {base}")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
