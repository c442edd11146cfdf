//! HTTP client for the analytics backend.

pub mod client;

pub use client::ApiClient;
