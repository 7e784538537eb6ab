//! JSON API endpoints.

pub mod exit_popup;
