//! autodeck - personal automation dashboard library
//!
//! Core functionality behind the `autodeck` binary: a JSON-backed task
//! store, daily report notes, a rotating activity log and platform token
//! status, plus the console, CLI and web front ends built on top of them.
//!
//! # Module Organization
//!
//! - `task`: Task records, selectors and the locked JSON store
//! - `report`: Daily report notes
//! - `activity`: Activity log with size-based rotation
//! - `platform`: Platform tokens read from the environment
//! - `export`: CSV export of the task collection
//! - `dashboard`: Dashboard view model and HTML rendering
//! - `deck`: Shared context tying the pieces to one home directory
//! - `web`: axum router for the dashboard and JSON API
//! - `cli`: Command-line interface and console menu
//! - `config`: Configuration loading from `autodeck.toml`
//! - `storage`: Home directory layout
//! - `lock`: File locking and atomic writes
//! - `output`: Human and JSON output
//! - `error`: Error types and result aliases

pub mod activity;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod deck;
pub mod error;
pub mod export;
pub mod lock;
pub mod output;
pub mod platform;
pub mod report;
pub mod storage;
pub mod task;
pub mod web;

pub use error::{Error, Result};
