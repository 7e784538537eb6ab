//! Session-related types.
//!
//! The visitor session stands in for browser storage: everything a visitor
//! keeps between page loads lives under one of these keys.

/// Session keys for visitor data.
pub mod keys {
    /// Key for the compare list (JSON array of product summaries).
    pub const COMPARE_PRODUCTS: &str = "compare_products";

    /// Key for the compare list owner token used to route change events.
    pub const COMPARE_OWNER: &str = "compare_owner";

    /// Key for recently run searches (JSON array, most recent first).
    pub const RECENT_SEARCHES: &str = "recent_searches";

    /// Key for the UTC timestamp of the last exit popup dismissal.
    pub const EXIT_POPUP_DISMISSED_AT: &str = "exit_popup_dismissed_at";
}
