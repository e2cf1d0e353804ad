//! Request keys identifying one logical search request.
//!
//! Every outbound request is tagged with the `(query, page)` pair it was
//! issued for. The host hands the tag back untouched with the response, which
//! lets the orchestrator drop responses for keys it no longer shows.

use std::collections::BTreeMap;
use std::fmt;

/// Context map entry holding the query text.
const CONTEXT_QUERY: &str = "zinema.query";

/// Context map entry holding the one-based page number.
const CONTEXT_PAGE: &str = "zinema.page";

/// The `(query, page)` pair a fetch is issued for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub query: String,
    pub page: u32,
}

impl FetchKey {
    #[must_use]
    pub fn new(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page,
        }
    }

    /// Encodes the key into a web request context map.
    ///
    /// ```
    /// use zinema::fetch::FetchKey;
    ///
    /// let key = FetchKey::new("batman", 3);
    /// let context = key.to_context();
    /// assert_eq!(FetchKey::from_context(&context), Some(key));
    /// ```
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_QUERY.to_string(), self.query.clone());
        context.insert(CONTEXT_PAGE.to_string(), self.page.to_string());
        context
    }

    /// Recovers a key from a context map returned by the host.
    ///
    /// Returns `None` for responses that were not issued by the fetch client
    /// (missing entries or a page that is not a positive integer).
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let query = context.get(CONTEXT_QUERY)?;
        let page = context
            .get(CONTEXT_PAGE)?
            .parse::<u32>()
            .ok()
            .filter(|page| *page >= 1)?;
        Some(Self::new(query.clone(), page))
    }
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} p{}", self.query, self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_foreign_context() {
        let mut context = BTreeMap::new();
        assert_eq!(FetchKey::from_context(&context), None);

        context.insert(CONTEXT_QUERY.to_string(), "alien".to_string());
        context.insert(CONTEXT_PAGE.to_string(), "0".to_string());
        assert_eq!(FetchKey::from_context(&context), None);

        context.insert(CONTEXT_PAGE.to_string(), "two".to_string());
        assert_eq!(FetchKey::from_context(&context), None);
    }

    #[test]
    fn keys_differ_by_page() {
        assert_ne!(FetchKey::new("batman", 1), FetchKey::new("batman", 3));
        assert_eq!(FetchKey::new("batman", 2).to_string(), "\"batman\" p2");
    }
}
