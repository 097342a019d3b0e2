// Copyright (c) 2026 QuizSage Shell Project. All rights reserved.

//! Session-aware verb dispatch
//!
//! Wraps the transport primitive with the single session credential. The
//! credential is read at request start and written at most once per
//! completed response; the latest token always wins.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::http::{
    Body, RequestOptions, Transport, TransportConfig, Verb, DEFAULT_TIMEOUT_MS, SESSION_COOKIE,
};

/// Connection parameters for a session client.
///
/// Deserializes from partial JSON; omitted fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Server address
    pub address: String,
    /// Server port
    pub port: u16,
    /// URL scheme, `https` or `http`
    pub protocol: String,
    /// Tolerate self-signed certificates
    pub self_signed: bool,
    /// Pre-existing session token, if any
    pub session_token: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            address: "localhost".to_string(),
            port: 443,
            protocol: "https".to_string(),
            self_signed: false,
            session_token: None,
        }
    }
}

/// Simplified result returned by the dispatch path
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed body, absent when the server sent none
    pub data: Option<Value>,
    /// Cookie map from the response
    pub cookies: HashMap<String, String>,
}

/// Transport wrapper owning the session credential
#[derive(Debug, Clone)]
pub struct SessionClient {
    base_url: String,
    transport: Transport,
    session_token: Arc<RwLock<Option<String>>>,
}

impl SessionClient {
    /// Create a session client for the given connection parameters
    pub fn new(config: SessionConfig) -> Result<Self> {
        let transport = Transport::with_config(TransportConfig {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            accept_invalid_certs: config.self_signed,
        })?;

        Ok(Self {
            base_url: format!("{}://{}:{}", config.protocol, config.address, config.port),
            transport,
            session_token: Arc::new(RwLock::new(config.session_token)),
        })
    }

    /// Whether a session token is currently held
    pub fn authenticated(&self) -> bool {
        self.session_token.read().is_some()
    }

    /// The server base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Dispatch a request against an endpoint.
    ///
    /// The current session token is merged into the options unless the
    /// caller supplied one. A renewed session cookie on a sub-300 response
    /// is adopted as the new credential; 300 and above raises
    /// `Error::Api` with the server's joined error messages.
    pub async fn dispatch(
        &self,
        verb: Verb,
        endpoint: &str,
        body: &Body,
        mut options: RequestOptions,
    ) -> Result<ApiResponse> {
        debug!(verb = %verb, endpoint = %endpoint, "=> {}", endpoint);

        if options.session_token.is_none() {
            options.session_token = self.session_token.read().clone();
        }

        let url = format!("{}{}", self.base_url, endpoint);
        let envelope = self.transport.request(verb, &url, &options, body).await?;

        if envelope.status < 300 {
            if let Some(token) = envelope.cookie(SESSION_COOKIE) {
                *self.session_token.write() = Some(token.to_string());
            }
            Ok(ApiResponse {
                status: envelope.status,
                data: envelope.data(),
                cookies: envelope.cookies,
            })
        } else {
            Err(Error::api(
                envelope.status,
                joined_error_messages(envelope.data().as_ref()),
            ))
        }
    }

    /// GET against an endpoint
    pub async fn get(&self, endpoint: &str) -> Result<ApiResponse> {
        self.dispatch(Verb::Get, endpoint, &Body::Empty, RequestOptions::default())
            .await
    }

    /// DELETE against an endpoint
    pub async fn delete(&self, endpoint: &str) -> Result<ApiResponse> {
        self.dispatch(
            Verb::Delete,
            endpoint,
            &Body::Empty,
            RequestOptions::default(),
        )
        .await
    }

    /// POST against an endpoint
    pub async fn post(&self, endpoint: &str, body: &Body) -> Result<ApiResponse> {
        self.dispatch(Verb::Post, endpoint, body, RequestOptions::default())
            .await
    }

    /// PUT against an endpoint
    pub async fn put(&self, endpoint: &str, body: &Body) -> Result<ApiResponse> {
        self.dispatch(Verb::Put, endpoint, body, RequestOptions::default())
            .await
    }

    /// PATCH against an endpoint
    pub async fn patch(&self, endpoint: &str, body: &Body) -> Result<ApiResponse> {
        self.dispatch(Verb::Patch, endpoint, body, RequestOptions::default())
            .await
    }
}

/// Join all server-reported error messages with `"; "`, defaulting to a
/// generic message when the server reports none
fn joined_error_messages(data: Option<&Value>) -> String {
    data.and_then(|d| d.get("errors"))
        .and_then(|e| e.as_array())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; ")
        })
        .unwrap_or_else(|| "Error".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Build a session config pointing at a wiremock server
    fn config_for(server: &MockServer) -> SessionConfig {
        let uri = url::Url::parse(&server.uri()).unwrap();
        SessionConfig {
            address: uri.host_str().unwrap().to_string(),
            port: uri.port().unwrap(),
            protocol: "http".to_string(),
            self_signed: false,
            session_token: None,
        }
    }

    #[tokio::test]
    async fn test_session_cookie_adopted_and_replayed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/first"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "quizsage_session=tok-1; Path=/; HttpOnly")
                    .set_body_json(json!({"ok": true})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/second"))
            .and(header("cookie", "quizsage_session=tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = SessionClient::new(config_for(&server)).unwrap();
        assert!(!client.authenticated());

        client.get("/first").await.unwrap();
        assert!(client.authenticated());

        client.get("/second").await.unwrap();
    }

    #[tokio::test]
    async fn test_renewed_token_wins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/renew"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "quizsage_session=tok-2")
                    .set_body_json(json!({})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/after"))
            .and(header("cookie", "quizsage_session=tok-2"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.session_token = Some("tok-old".to_string());
        let client = SessionClient::new(config).unwrap();
        assert!(client.authenticated());

        client.get("/renew").await.unwrap();
        client.get("/after").await.unwrap();
    }

    #[tokio::test]
    async fn test_error_messages_joined() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fail"))
            .respond_with(ResponseTemplate::new(422).set_body_json(
                json!({"errors": [{"message": "x"}, {"message": "y"}]}),
            ))
            .mount(&server)
            .await;

        let client = SessionClient::new(config_for(&server)).unwrap();
        let err = client.get("/fail").await.unwrap_err();
        match err {
            Error::Api { status, ref message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "x; y");
            }
            ref other => panic!("expected Api error, got {:?}", other),
        }
        assert_eq!(err.code().as_deref(), Some("ERR_STATUS_CODE_422"));
    }

    #[tokio::test]
    async fn test_error_without_messages_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/plain-fail"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = SessionClient::new(config_for(&server)).unwrap();
        let err = client.get("/plain-fail").await.unwrap_err();
        match err {
            Error::Api { status, ref message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Error");
            }
            ref other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_body_data_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = SessionClient::new(config_for(&server)).unwrap();
        let resp = client.delete("/gone").await.unwrap();
        assert_eq!(resp.status, 204);
        assert!(resp.data.is_none());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"address": "quizsage.example.com", "self_signed": true}"#)
                .unwrap();
        assert_eq!(config.address, "quizsage.example.com");
        assert_eq!(config.port, 443);
        assert_eq!(config.protocol, "https");
        assert!(config.self_signed);
        assert!(config.session_token.is_none());
    }

    #[test]
    fn test_response_serializes() {
        let resp = ApiResponse {
            status: 200,
            data: Some(json!({"ok": true})),
            cookies: HashMap::new(),
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"status": 200, "data": {"ok": true}, "cookies": {}})
        );
    }

    #[test]
    fn test_joined_error_messages_shapes() {
        assert_eq!(joined_error_messages(None), "Error");
        assert_eq!(joined_error_messages(Some(&json!({"other": 1}))), "Error");
        assert_eq!(joined_error_messages(Some(&json!({"errors": []}))), "");
        assert_eq!(
            joined_error_messages(Some(&json!({"errors": [{"message": "only"}]}))),
            "only"
        );
    }
}
