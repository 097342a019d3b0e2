// Copyright (c) 2026 QuizSage Shell Project. All rights reserved.

//! Tolerant Set-Cookie parsing
//!
//! The session protocol only needs a name/value map, so cookie attributes
//! (domain, path, expiry) are ignored. Malformed lines are discarded
//! silently.

use std::collections::HashMap;

use reqwest::header::HeaderMap;

use super::headers::SET_COOKIE;

/// Parse a single Set-Cookie header into a name/value pair.
///
/// Takes the first `=`-delimited pair before the first `;`. Lines without
/// an `=` are malformed and yield `None`.
pub fn parse_set_cookie(header: &str) -> Option<(String, String)> {
    let first = header.split(';').next()?.trim();
    let (name, value) = first.split_once('=')?;
    Some((name.trim().to_string(), value.trim().to_string()))
}

/// Collect all Set-Cookie headers from a response into a name/value map
pub fn cookie_map(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(parse_set_cookie)
        .collect()
}
