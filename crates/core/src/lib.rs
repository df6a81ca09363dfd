//! Greengrocer Core - Shared types library.
//!
//! This crate provides common types used across all Greengrocer components:
//! - `web` - The server-rendered web application
//! - `integration-tests` - End-to-end tests against the composed router
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, the validated username type, and the item
//!   category enumeration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
