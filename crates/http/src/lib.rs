//! s3p-http: HTTP transport adapter for the s3p gateway client
//!
//! This crate provides the implementation of the HttpTransport trait
//! using the reqwest crate. It is the only crate that directly
//! depends on an HTTP client.

pub mod client;

pub use client::ReqwestTransport;
