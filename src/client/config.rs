//! Per-call configuration for the GitHub client

use std::collections::HashMap;

use compact_str::CompactString;

/// Credentials and header overrides supplied at execution time.
///
/// A `Config` is independent of the operation being executed: the same
/// operation value can be replayed with different credentials. The transport
/// never mutates it.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Personal access token; unauthenticated when absent
    pub access_token: Option<CompactString>,
    /// Extra headers merged after the defaults, overriding them on collision
    pub headers: HashMap<CompactString, CompactString>,
}

impl Config {
    /// Create an unauthenticated configuration with no header overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access token
    pub fn with_token(mut self, token: impl Into<CompactString>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Add a header override
    pub fn with_header(
        mut self,
        name: impl Into<CompactString>,
        value: impl Into<CompactString>,
    ) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Page selection for list endpoints.
///
/// Passed through as `page` / `per_page` query parameters when present; no
/// validation is performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page: Some(page), per_page: Some(per_page) }
    }

    /// Set the page number
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Query pairs for the fields that are present
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, CompactString)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", CompactString::from(page.to_string())));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", CompactString::from(per_page.to_string())));
        }
        pairs
    }
}
