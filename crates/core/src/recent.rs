//! Recently run search queries.

/// Default number of remembered searches.
pub const DEFAULT_RECENT_SEARCH_LIMIT: usize = 5;

/// Most-recent-first list of search queries, deduplicated case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSearches {
    entries: Vec<String>,
    limit: usize,
}

impl RecentSearches {
    /// Create an empty list.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Rebuild from persisted entries (oldest last).
    #[must_use]
    pub fn from_entries(entries: Vec<String>, limit: usize) -> Self {
        let mut recent = Self::new(limit);
        for entry in entries.into_iter().rev() {
            recent.record(&entry);
        }
        recent
    }

    /// Record a query. Blank queries are ignored.
    ///
    /// Returns whether the list changed.
    pub fn record(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() || self.limit == 0 {
            return false;
        }
        if self.entries.first().is_some_and(|first| first == query) {
            return false;
        }
        self.entries.retain(|entry| !entry.eq_ignore_ascii_case(query));
        self.entries.insert(0, query.to_owned());
        self.entries.truncate(self.limit);
        true
    }

    /// Forget every query.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Queries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Take the queries out.
    #[must_use]
    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }
}

impl Default for RecentSearches {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_SEARCH_LIMIT)
    }
}
