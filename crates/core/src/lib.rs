//! Flightdeck Core - Listing state machine and shared storefront types.
//!
//! This crate provides the logic shared by every product-grid page of the
//! Flightdeck storefront:
//! - `storefront` - Public-facing site (collections, all products, search)
//! - `integration-tests` - End-to-end tests against the assembled router
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O, no
//! sessions, no HTTP clients. Persistence and change notification live in the
//! storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices
//! - [`listing`] - Filter/sort/view state, URL codec, reducer and chip projector
//! - [`compare`] - Bounded product compare list
//! - [`recent`] - Recent searches list
//! - [`popup`] - Exit popup suppression window

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod compare;
pub mod listing;
pub mod popup;
pub mod recent;
pub mod types;

pub use types::*;
