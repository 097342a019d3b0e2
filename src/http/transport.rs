// Copyright (c) 2026 QuizSage Shell Project. All rights reserved.

//! The transport primitive
//!
//! Issues exactly one HTTP(S) request and normalizes the response. The
//! timeout guard is armed at request start and disarmed the moment the
//! response headers arrive; reading the body is not under the timer, so a
//! late timer cannot reject a call that already resolved.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use crate::error::{Error, Result};

use super::headers::{CONTENT_LENGTH, CONTENT_TYPE, COOKIE};
use super::request::{Body, RequestOptions, Verb};
use super::response::Envelope;
use super::{DEFAULT_TIMEOUT_MS, SESSION_COOKIE};

/// Transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Default timeout applied when request options carry none
    pub timeout: Duration,
    /// Tolerate self-signed certificates (TLS policy is fixed at build time)
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            accept_invalid_certs: false,
        }
    }
}

/// Issues single HTTP(S) requests and normalizes responses into envelopes
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    config: TransportConfig,
}

impl Transport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let client = Client::builder()
            // Redirects surface as 3xx statuses; the dispatch layer decides
            .redirect(Policy::none())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .cookie_store(false)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the transport configuration
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Issue a request and normalize the response.
    ///
    /// Fails with `UnsupportedProtocol` for non-HTTP(S) schemes and `Config`
    /// for unusable header overrides, both before any I/O; `Timeout`/`Network`
    /// on transport failures; and `Parse` when a JSON-typed body does not
    /// parse.
    pub async fn request(
        &self,
        verb: Verb,
        url: &str,
        options: &RequestOptions,
        body: &Body,
    ) -> Result<Envelope> {
        let parsed = Url::parse(url)?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => return Err(Error::UnsupportedProtocol(scheme.to_string())),
        }

        let mut headers = HeaderMap::new();

        // GET and DELETE never send a body, even if one is supplied
        let mut wire_body = None;
        if verb.sends_body() && !body.is_empty() {
            let wire = body.serialize(options.content_type)?;
            headers.insert(CONTENT_LENGTH, HeaderValue::from(wire.len()));
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static(options.content_type.as_str()),
            );
            wire_body = Some(wire);
        }

        if let Some(token) = &options.session_token {
            let value = HeaderValue::try_from(format!("{}={}", SESSION_COOKIE, token))
                .map_err(|_| Error::config("session token is not a valid cookie value"))?;
            headers.insert(COOKIE, value);
        }

        // Caller overrides win over everything computed above
        for (name, value) in &options.headers {
            let header_name = HeaderName::try_from(name.as_str())
                .map_err(|_| Error::config(format!("invalid header name '{}'", name)))?;
            let header_value = HeaderValue::try_from(value.as_str())
                .map_err(|_| Error::config(format!("invalid value for header '{}'", name)))?;
            headers.insert(header_name, header_value);
        }

        let mut builder = self.client.request(verb.into(), parsed).headers(headers);
        if let Some(wire) = wire_body {
            builder = builder.body(wire);
        }

        let timeout = if options.timeout.is_zero() {
            self.config.timeout
        } else {
            options.timeout
        };

        let response = match tokio::time::timeout(timeout, builder.send()).await {
            Err(_) => {
                return Err(Error::Timeout {
                    duration_ms: timeout.as_millis() as u64,
                })
            }
            Ok(result) => result?,
        };

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let text = response.text().await?;

        Envelope::from_parts(status, &headers, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{BodyData, ContentType};
    use serde_json::json;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> Transport {
        Transport::new().unwrap()
    }

    #[tokio::test]
    async fn test_unsupported_scheme_rejected() {
        let err = transport()
            .request(
                Verb::Get,
                "ftp://example.com/file",
                &RequestOptions::default(),
                &Body::Empty,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedProtocol(ref s) if s == "ftp"));
    }

    #[tokio::test]
    async fn test_post_sends_json_body_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(header("content-type", "application/json"))
            .and(body_string(r#"{"a":1}"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let env = transport()
            .request(
                Verb::Post,
                &format!("{}/submit", server.uri()),
                &RequestOptions::default(),
                &Body::Json(json!({"a": 1})),
            )
            .await
            .unwrap();
        assert_eq!(env.status, 200);
        assert_eq!(env.data(), Some(json!({"ok": true})));
    }

    #[tokio::test]
    async fn test_form_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/form"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("a=1&b=two"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let body = Body::Form(vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "two".to_string()),
        ]);
        let opts = RequestOptions::new().content_type(ContentType::FormUrlencoded);
        let env = transport()
            .request(Verb::Post, &format!("{}/form", server.uri()), &opts, &body)
            .await
            .unwrap();
        assert_eq!(env.status, 200);
    }

    #[tokio::test]
    async fn test_get_never_sends_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/things"))
            .and(body_string(""))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let env = transport()
            .request(
                Verb::Get,
                &format!("{}/things", server.uri()),
                &RequestOptions::default(),
                &Body::Json(json!({"ignored": true})),
            )
            .await
            .unwrap();
        assert_eq!(env.status, 200);
    }

    #[tokio::test]
    async fn test_session_token_cookie_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/private"))
            .and(header("cookie", "quizsage_session=tok123"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let opts = RequestOptions::new().session_token("tok123");
        let env = transport()
            .request(
                Verb::Get,
                &format!("{}/private", server.uri()),
                &opts,
                &Body::Empty,
            )
            .await
            .unwrap();
        assert_eq!(env.status, 200);
    }

    #[tokio::test]
    async fn test_header_override_wins() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/override"))
            .and(header("content-type", "text/plain"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let opts = RequestOptions::new().header("content-type", "text/plain");
        let env = transport()
            .request(
                Verb::Post,
                &format!("{}/override", server.uri()),
                &opts,
                &Body::Raw("hi".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(env.status, 200);
    }

    #[tokio::test]
    async fn test_timeout_fires() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let opts = RequestOptions::new().timeout(Duration::from_millis(50));
        let err = transport()
            .request(
                Verb::Get,
                &format!("{}/slow", server.uri()),
                &opts,
                &Body::Empty,
            )
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "Request timed out after 50ms");
    }

    #[tokio::test]
    async fn test_invalid_header_override_rejected() {
        let err = transport()
            .request(
                Verb::Get,
                "https://example.com/things",
                &RequestOptions::new().header("bad name", "x"),
                &Body::Empty,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("bad name")));

        let err = transport()
            .request(
                Verb::Get,
                "https://example.com/things",
                &RequestOptions::new().header("x-extra", "line\nbreak"),
                &Body::Empty,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("x-extra")));
    }

    #[tokio::test]
    async fn test_invalid_session_token_rejected() {
        let err = transport()
            .request(
                Verb::Get,
                "https://example.com/private",
                &RequestOptions::new().session_token("tok\nen"),
                &Body::Empty,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_set_cookie_captured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/login-ish"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "quizsage_session=fresh; Path=/; HttpOnly")
                    .set_body_json(json!({"success": true})),
            )
            .mount(&server)
            .await;

        let env = transport()
            .request(
                Verb::Get,
                &format!("{}/login-ish", server.uri()),
                &RequestOptions::default(),
                &Body::Empty,
            )
            .await
            .unwrap();
        assert_eq!(env.cookie(SESSION_COOKIE), Some("fresh"));
        assert!(matches!(env.body, BodyData::Json(_)));
    }

    #[tokio::test]
    async fn test_bad_json_rejects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("{not json", "application/json"),
            )
            .mount(&server)
            .await;

        let err = transport()
            .request(
                Verb::Get,
                &format!("{}/broken", server.uri()),
                &RequestOptions::default(),
                &Body::Empty,
            )
            .await
            .unwrap_err();
        assert!(err.is_parse());
    }
}
