// Copyright (c) 2026 QuizSage Shell Project. All rights reserved.

//! Normalized response envelope
//!
//! The envelope is immutable once produced: status code, parsed body,
//! cookie map, and the resolved content type. Body decoding follows the
//! declared MIME type; an undeclarable type degrades to raw text rather
//! than failing.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::header::HeaderMap;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::{Error, Result};

use super::cookie::cookie_map;
use super::headers::CONTENT_TYPE;

lazy_static! {
    /// Tolerant MIME matcher: captures the subtype of application/* and
    /// text/* declarations, ignoring parameters like charset
    static ref MIME_SUBTYPE: Regex =
        Regex::new(r"(application|text)/([^;\s]+)").expect("static regex");
}

/// Parsed response body
#[derive(Debug, Clone, PartialEq)]
pub enum BodyData {
    /// No body
    None,
    /// Parsed JSON value
    Json(Value),
    /// Parsed form-urlencoded map
    Form(HashMap<String, String>),
    /// Raw text for unrecognized content types
    Text(String),
}

/// Normalized representation of an HTTP response
#[derive(Debug, Clone)]
pub struct Envelope {
    /// HTTP status code
    pub status: u16,
    /// Parsed body
    pub body: BodyData,
    /// Name/value map extracted from all Set-Cookie headers
    pub cookies: HashMap<String, String>,
    /// Resolved MIME subtype (e.g. "json"), if the declaration parsed
    pub content_type: Option<String>,
}

impl Envelope {
    /// Build an envelope from the raw response parts.
    ///
    /// Fails with `Error::Parse` only when the declared content type is
    /// JSON and the body does not parse as JSON.
    pub fn from_parts(status: u16, headers: &HeaderMap, text: String) -> Result<Self> {
        let cookies = cookie_map(headers);

        let declared = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
        let subtype = declared
            .and_then(|ct| MIME_SUBTYPE.captures(ct))
            .map(|caps| caps[2].to_string());

        let body = match subtype.as_deref() {
            // Unparsable declaration: raw text, no failure
            None => BodyData::Text(text),
            Some(st) if st.contains("urlencoded") => {
                let map: HashMap<String, String> = form_urlencoded::parse(text.as_bytes())
                    .into_owned()
                    .collect();
                BodyData::Form(map)
            }
            Some(st) if st.contains("json") => {
                let value: Value = serde_json::from_str(&text)
                    .map_err(|e| Error::parse(format!("invalid JSON body: {}", e)))?;
                BodyData::Json(value)
            }
            Some(_) => BodyData::Text(text),
        };

        Ok(Self {
            status,
            body,
            cookies,
            content_type: subtype,
        })
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The parsed body as an optional JSON value.
    ///
    /// Empty text and JSON null both map to `None`; form maps become
    /// JSON objects.
    pub fn data(&self) -> Option<Value> {
        match &self.body {
            BodyData::None => None,
            BodyData::Json(Value::Null) => None,
            BodyData::Json(v) => Some(v.clone()),
            BodyData::Form(map) => Some(Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            )),
            BodyData::Text(s) if s.is_empty() => None,
            BodyData::Text(s) => Some(Value::String(s.clone())),
        }
    }

    /// Get a cookie value by name
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}
