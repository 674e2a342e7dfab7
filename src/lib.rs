//! elastop - live terminal dashboard for Elasticsearch clusters.
//!
//! The library holds everything except process setup:
//! - `client` - telemetry endpoints, payload schema, release lookup
//! - `activity` - per-index ingest rate tracking across refreshes
//! - `layout` - panel visibility and grid geometry
//! - `fmt`, `markup`, `roles` - pure formatting into marked-up text
//! - `view` - per-panel view models and their text rendering
//! - `dashboard` - the state owned by the refresh worker
//! - `tui` - terminal surface, event producers and the worker loop

pub mod activity;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod fmt;
pub mod layout;
pub mod markup;
pub mod roles;
pub mod tui;
pub mod view;
