// Copyright (c) 2026 QuizSage Shell Project. All rights reserved.

//! Domain endpoints of the QuizSage API
//!
//! Thin query builders over the session client's verb helpers. No HTTP
//! logic lives here.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::http::Body;

use super::query::QueryString;
use super::session::{ApiResponse, SessionClient, SessionConfig};

/// Bible translations the server knows about; no network call involved
pub const BIBLES: &[&str] = &["Protestant", "Orthodox", "Catholic"];

/// Options for [`ApiClient::parse_reference`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseReferenceOptions {
    /// Restrict parsing to one bible translation
    pub bible: Option<String>,
    /// Render book names as abbreviations (server: `acronyms`)
    pub abbreviate: Option<bool>,
    /// Sort the parsed references canonically (server: `sorting`)
    pub sorted: Option<bool>,
    /// Require an explicit chapter match (server: `require_chapter_match`)
    pub exact_chapter: Option<bool>,
    /// Require an explicit verse match (server: `require_verse_match`)
    pub exact_verse: Option<bool>,
    /// Require book names to start uppercase (server: `require_verse_ucfirst`)
    pub exact_book: Option<bool>,
    /// Minimum length for book-name matching
    pub minimum_book_length: Option<u32>,
    /// Expand ranges into per-verse detail (server: `add_detail`)
    pub expand_verses: Option<bool>,
}

/// Client for the QuizSage API: session dispatch plus domain endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    session: SessionClient,
}

impl ApiClient {
    /// Create a client for the given connection parameters
    pub fn new(config: SessionConfig) -> Result<Self> {
        Ok(Self {
            session: SessionClient::new(config)?,
        })
    }

    /// The underlying session client, for raw verb access
    pub fn session(&self) -> &SessionClient {
        &self.session
    }

    /// Whether a session token is currently held
    pub fn authenticated(&self) -> bool {
        self.session.authenticated()
    }

    /// Authenticate against the server.
    ///
    /// The session cookie is adopted by the dispatch path; a response body
    /// with `success: false` raises a 400 API error carrying the server's
    /// message.
    pub async fn login(&self, email: &str, password: &str) -> Result<Value> {
        let resp = self
            .session
            .post(
                "/api/v1/user/login",
                &Body::Json(json!({ "email": email, "password": password })),
            )
            .await?;

        let data = resp.data.unwrap_or(Value::Null);
        let success = data
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if !success {
            let message = data
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Login failed");
            return Err(Error::api(400, message));
        }
        Ok(data)
    }

    /// The static list of bible translations
    pub fn bibles(&self) -> &'static [&'static str] {
        BIBLES
    }

    /// Fetch the book list for a translation
    pub async fn bible_books(&self, bible: Option<&str>) -> Result<Value> {
        let endpoint = books_endpoint(bible);
        Ok(data_of(self.session.get(&endpoint).await?))
    }

    /// Fetch the canonical structure for a translation
    pub async fn bible_structure(&self, bible: Option<&str>) -> Result<Value> {
        let endpoint = structure_endpoint(bible);
        Ok(data_of(self.session.get(&endpoint).await?))
    }

    /// Identify translation(s) from a supplied book list
    pub async fn identify_from_books<S: AsRef<str>>(&self, books: &[S]) -> Result<Value> {
        let endpoint = identify_endpoint(books);
        Ok(data_of(self.session.get(&endpoint).await?))
    }

    /// Parse a free-text scripture reference
    pub async fn parse_reference(
        &self,
        text: &str,
        opts: &ParseReferenceOptions,
    ) -> Result<Value> {
        let endpoint = parse_reference_endpoint(text, opts);
        Ok(data_of(self.session.get(&endpoint).await?))
    }
}

fn data_of(resp: ApiResponse) -> Value {
    resp.data.unwrap_or(Value::Null)
}

fn books_endpoint(bible: Option<&str>) -> String {
    let qs = QueryString::new().append_opt("bible", bible);
    format!("/api/v1/bible/books{}", qs)
}

fn structure_endpoint(bible: Option<&str>) -> String {
    let qs = QueryString::new().append_opt("bible", bible);
    format!("/api/v1/bible/structure{}", qs)
}

fn identify_endpoint<S: AsRef<str>>(books: &[S]) -> String {
    let qs = QueryString::new().append_all("books", books.iter().map(AsRef::as_ref));
    format!("/api/v1/bible/identify{}", qs)
}

fn parse_reference_endpoint(text: &str, opts: &ParseReferenceOptions) -> String {
    let qs = QueryString::new()
        .append("text", text)
        .append_opt("bible", opts.bible.as_deref())
        .append_opt("acronyms", opts.abbreviate)
        .append_opt("sorting", opts.sorted)
        .append_opt("require_chapter_match", opts.exact_chapter)
        .append_opt("require_verse_match", opts.exact_verse)
        .append_opt("require_verse_ucfirst", opts.exact_book)
        .append_opt("minimum_book_length", opts.minimum_book_length)
        .append_opt("add_detail", opts.expand_verses);
    format!("/api/v1/bible/reference/parse{}", qs)
}
