//! # WeCom API Client Library
//!
//! Credential-managing client for the WeCom (Enterprise WeChat) HTTP API:
//! token acquisition and per-secret caching, expiry-aware reuse,
//! error-driven invalidation, and the request wrapper the messaging,
//! directory and connectivity operations are built on.
//!
//! Modules:
//! - `config` — YAML configuration loading and validation
//! - `cache` — owned, credential-keyed token cache
//! - `client` — token manager, request executor, operations
//! - `error` — failure classes surfaced to callers

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod tests;
pub mod utils;

pub use crate::client::types::{DeliveryReceipt, DomainIpList, MsgType, OutgoingMessage, UserProfile};
pub use crate::client::WecomClient;
pub use crate::config::settings::{ClientConfig, ServiceConfig};
pub use crate::error::WecomError;
