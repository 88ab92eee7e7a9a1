//! API Client Module
//!
//! HTTP calls to the interviewer REST API. No retries and no caching.

pub mod client;

pub use client::*;
