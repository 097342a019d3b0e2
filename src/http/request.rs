// Copyright (c) 2026 QuizSage Shell Project. All rights reserved.

//! Request descriptor types
//!
//! A descriptor is constructed fresh for every call and never persisted.
//! Bodies are serialized according to the selected content type; GET and
//! DELETE never carry one.

use std::time::Duration;

use serde_json::Value;

use crate::error::{Error, Result};

use super::DEFAULT_TIMEOUT_MS;

/// HTTP verbs supported by the transport primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    /// Whether this verb sends a request body. GET and DELETE never do,
    /// even if a body is supplied.
    pub fn sends_body(&self) -> bool {
        matches!(self, Verb::Post | Verb::Put | Verb::Patch)
    }

    /// The wire method name
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }
}

impl From<Verb> for reqwest::Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
            Verb::Patch => reqwest::Method::PATCH,
            Verb::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body content type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    /// `application/json` (the default)
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`
    FormUrlencoded,
}

impl ContentType {
    /// The MIME string sent in the `Content-Type` header
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::FormUrlencoded => "application/x-www-form-urlencoded",
        }
    }
}

/// Request body
#[derive(Debug, Clone, Default)]
pub enum Body {
    /// No body
    #[default]
    Empty,
    /// Structured value, serialized per the content type selector
    Json(Value),
    /// Key/value pairs, serialized per the content type selector
    Form(Vec<(String, String)>),
    /// Raw string sent as-is
    Raw(String),
}

impl Body {
    /// Check whether there is anything to send
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Empty => true,
            Body::Json(v) => v.is_null(),
            Body::Form(pairs) => pairs.is_empty(),
            Body::Raw(s) => s.is_empty(),
        }
    }

    /// Serialize the body for the wire under the given content type
    pub fn serialize(&self, content_type: ContentType) -> Result<String> {
        match self {
            Body::Empty => Ok(String::new()),
            Body::Raw(s) => Ok(s.clone()),
            Body::Json(value) => match content_type {
                ContentType::Json => serde_json::to_string(value)
                    .map_err(|e| Error::parse(e.to_string())),
                ContentType::FormUrlencoded => {
                    // Only flat objects make sense as form data
                    let obj = value
                        .as_object()
                        .ok_or_else(|| Error::parse("form body must be a JSON object"))?;
                    let pairs: Vec<(String, String)> = obj
                        .iter()
                        .map(|(k, v)| (k.clone(), value_to_form_string(v)))
                        .collect();
                    Ok(encode_pairs(&pairs))
                }
            },
            Body::Form(pairs) => match content_type {
                ContentType::FormUrlencoded => Ok(encode_pairs(pairs)),
                ContentType::Json => {
                    let map: serde_json::Map<String, Value> = pairs
                        .iter()
                        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                        .collect();
                    serde_json::to_string(&Value::Object(map))
                        .map_err(|e| Error::parse(e.to_string()))
                }
            },
        }
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        if value.is_null() {
            Body::Empty
        } else {
            Body::Json(value)
        }
    }
}

fn value_to_form_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Per-request options, constructed fresh for every call
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Session token attached as the `quizsage_session` cookie when present
    pub session_token: Option<String>,
    /// Body content type selector
    pub content_type: ContentType,
    /// Timeout armed at request start, disarmed when the response begins
    pub timeout: Duration,
    /// Header overrides merged last, taking precedence over computed defaults
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            session_token: None,
            content_type: ContentType::default(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session token
    pub fn session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Set the content type selector
    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a header override
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verb_body_rules() {
        assert!(Verb::Post.sends_body());
        assert!(Verb::Put.sends_body());
        assert!(Verb::Patch.sends_body());
        assert!(!Verb::Get.sends_body());
        assert!(!Verb::Delete.sends_body());
    }

    #[test]
    fn test_json_body_serialization() {
        let body = Body::Json(json!({"email": "a@b.com", "password": "secret"}));
        let wire = body.serialize(ContentType::Json).unwrap();
        let round: Value = serde_json::from_str(&wire).unwrap();
        assert_eq!(round["email"], "a@b.com");
    }

    #[test]
    fn test_form_body_serialization() {
        let body = Body::Form(vec![
            ("name".to_string(), "John Doe".to_string()),
            ("q".to_string(), "a&b".to_string()),
        ]);
        let wire = body.serialize(ContentType::FormUrlencoded).unwrap();
        assert_eq!(wire, "name=John%20Doe&q=a%26b");
    }

    #[test]
    fn test_json_object_as_form() {
        let body = Body::Json(json!({"count": 3}));
        let wire = body.serialize(ContentType::FormUrlencoded).unwrap();
        assert_eq!(wire, "count=3");
    }

    #[test]
    fn test_empty_body() {
        assert!(Body::Empty.is_empty());
        assert!(Body::Raw(String::new()).is_empty());
        assert!(Body::Json(Value::Null).is_empty());
        assert!(!Body::Raw("x".to_string()).is_empty());
    }

    #[test]
    fn test_default_options() {
        let opts = RequestOptions::default();
        assert_eq!(opts.timeout, Duration::from_millis(20_000));
        assert_eq!(opts.content_type, ContentType::Json);
        assert!(opts.session_token.is_none());
        assert!(opts.headers.is_empty());
    }
}
