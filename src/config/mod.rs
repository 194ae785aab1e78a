//! # Configuration
//!
//! Typed configuration records and the store client settings.
//!
//! - [`ClientConfig`]: how to reach the secret store
//! - [`DatabaseConfig`], [`CacheConfig`], [`TokenConfig`]: resolved per call by
//!   [`SecretsClient`](crate::SecretsClient), from environment variables or the store
//! - [`ServiceConfig`]: settings for the bundled example service

pub mod cache;
pub mod client;
pub mod database;
pub mod service;
pub mod token;

pub use cache::CacheConfig;
pub use client::ClientConfig;
pub use database::DatabaseConfig;
pub use service::ServiceConfig;
pub use token::TokenConfig;
