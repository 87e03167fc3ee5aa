//! Library crate for usrdesk.
//!
//! This crate exposes the building blocks of the TUI:
//! - REST client for the user service (`api`)
//! - Application state, modals and the update loop (`app`)
//! - Command-line and config-file handling (`config`)
//! - Error and result types (`error`)
//! - Path routing between screens (`router`)
//! - In-memory search helpers (`search`)
//! - Field validation for the user form (`validation`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `usrdesk` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod router;
pub mod search;
pub mod ui;
pub mod validation;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
