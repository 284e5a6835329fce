//! s3p-core: Core library for the s3p gateway client
//!
//! This crate provides the core functionality for the s3p CLI, including:
//! - Credential resolution from the environment, `.env` and a config file
//! - HttpTransport trait for sending requests
//! - Gateway request logic for list/get/put/delete, direct or presigned
//!
//! This crate is designed to be independent of any specific HTTP client,
//! allowing the request logic to be tested without a network.

pub mod config;
pub mod error;
pub mod gateway;
pub mod request;
pub mod traits;

pub use config::{API_KEY_VAR, API_URL_VAR, CONFIG_DIR_VAR, ConfigLoader, Credentials};
pub use error::{Error, Result};
pub use gateway::{Gateway, ObjectRef, PresignedUrlResponse, TransferMode};
pub use request::{API_KEY_HEADER, HttpRequest, HttpResponse};
pub use traits::HttpTransport;

pub use http::{HeaderMap, HeaderValue, Method};
