//! HTTP client module
//!
//! Thin wrapper over reqwest shared by both connectors.
//!
//! # Behavior
//!
//! - **Single attempt**: every request is sent once; there are no retries
//! - **Authentication**: credentials applied through the auth module
//! - **Strict status handling**: any non-2xx status is an upstream error
//! - **Strict JSON**: an unparsable body is an upstream error

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
