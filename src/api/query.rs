// Copyright (c) 2026 QuizSage Shell Project. All rights reserved.

//! Query-string builder
//!
//! Pairs with unset values are skipped. No defined pairs renders `""`;
//! otherwise a single `?`-prefixed string of `&`-joined `key=value` pairs,
//! keys and values percent-encoded, no trailing separator.

/// Ordered builder for URL query strings
#[derive(Debug, Clone, Default)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a defined key/value pair
    pub fn append(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a pair only when the value is set
    pub fn append_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.append(key, v),
            None => self,
        }
    }

    /// Append one `key=value` pair per element, in input order
    pub fn append_all<I, T>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        for value in values {
            self = self.append(key, value);
        }
        self
    }

    /// Render the final query string
    pub fn render(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let joined = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{}", joined)
    }
}

impl std::fmt::Display for QueryString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}
