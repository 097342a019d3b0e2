// Copyright (c) 2026 QuizSage Shell Project. All rights reserved.

//! HTTP transport layer for the QuizSage client
//!
//! Issues a single HTTP(S) request and normalizes the response into a
//! uniform envelope: status code, parsed body, cookie map, content type.
//! Session authentication rides on a fixed cookie name.

mod cookie;
mod request;
mod response;
mod transport;

pub use cookie::{cookie_map, parse_set_cookie};
pub use request::{Body, ContentType, RequestOptions, Verb};
pub use response::{BodyData, Envelope};
pub use transport::{Transport, TransportConfig};

/// Name of the session cookie issued by the server on login
pub const SESSION_COOKIE: &str = "quizsage_session";

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;

/// Common HTTP headers
pub mod headers {
    pub const CONTENT_TYPE: &str = "content-type";
    pub const CONTENT_LENGTH: &str = "content-length";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
}
