//! Read-only view over a file-based agent task queue.
//!
//! The queue is a handful of YAML files under one root: a commands file, a
//! directory of per-agent task files and a directory of per-agent report
//! files, plus a markdown dashboard. This crate loads them into validated
//! records and aggregates them for dashboards and CLI tools.
//!
//! Quick start:
//! - Resolve the root with `shogun_core::config::discover_root` and load
//!   settings via `shogun_core::config::load(Some(&root))`.
//! - Build a `shogun_core::query::QueueView` and call `commands`, `tasks`,
//!   `reports`, `dashboard` or `read_raw`.
//!
//! Records that fail validation are dropped individually; files that cannot
//! be read or parsed contribute nothing to bulk listings. Explicit raw reads
//! report a `ReadError` with a stable `ErrorCode`.

pub mod adapters;
pub mod aggregate;
pub mod config;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod query;

pub use error::{ErrorCode, ReadError};
pub use query::{CommandFilter, Page, PageRequest, QueueView};
