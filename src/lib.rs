// Copyright (c) 2026 QuizSage Shell Project. All rights reserved.

//! # QuizSage Client
//!
//! Client library and interactive shell for the QuizSage JSON/HTTP API.
//!
//! The core is a small request/response normalization layer: one transport
//! primitive that issues a single HTTP(S) request and folds the response
//! into a uniform envelope (status, parsed body, cookie map, content
//! type), wrapped by a session-aware client that carries the
//! `quizsage_session` cookie and exposes verb helpers plus the domain
//! endpoints.
//!
//! No retries, no pooling, no streaming: every call is one request, one
//! normalized result, one structured error on failure.
//!
//! ## Example
//!
//! ```rust,no_run
//! use quizsage_client::api::{ApiClient, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(SessionConfig {
//!         address: "quizsage.example.com".to_string(),
//!         ..SessionConfig::default()
//!     })?;
//!
//!     client.login("me@example.com", "secret").await?;
//!     assert!(client.authenticated());
//!
//!     let books = client.bible_books(Some("Protestant")).await?;
//!     println!("{}", books);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod http;
pub mod shell;

// Re-exports for convenience

// API client
pub use api::{ApiClient, ApiResponse, ParseReferenceOptions, QueryString, SessionClient, SessionConfig};

// Errors
pub use error::{Error, Result};

// Transport
pub use http::{Body, BodyData, ContentType, Envelope, RequestOptions, Transport, TransportConfig, Verb};
pub use http::{DEFAULT_TIMEOUT_MS, SESSION_COOKIE};

// Shell
pub use shell::Shell;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
