// Copyright (c) 2026 QuizSage Shell Project. All rights reserved.

//! Session-aware API client
//!
//! A transport-agnostic session/dispatch component (`SessionClient`)
//! wrapped by a domain-endpoint component (`ApiClient`) that holds no HTTP
//! logic of its own.

mod client;
mod query;
mod session;

pub use client::{ApiClient, ParseReferenceOptions, BIBLES};
pub use query::QueryString;
pub use session::{ApiResponse, SessionClient, SessionConfig};
