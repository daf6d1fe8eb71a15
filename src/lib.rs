//! td - Task Dashboard Library
//!
//! This library provides the core functionality for the td CLI and TUI
//! client for the task-management REST backend.
//!
//! # Core Concepts
//!
//! - **Session**: A bearer token stored on disk between runs
//! - **Dashboard**: The task cache plus filter and single edit slot
//! - **Reload After Mutation**: Every accepted change refetches the list
//! - **Error Taxonomy**: Backend statuses mapped to one user message each
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `config.toml`
//! - `error`: Error types and result aliases
//! - `api`: Blocking HTTP client for the REST backend
//! - `auth`: Credential validation, login, and registration
//! - `session`: Token persistence in the user data directory
//! - `task`: Task data model, filters, and counts
//! - `dashboard`: Dashboard view-model shared by CLI and TUI
//! - `ui`: Interactive terminal dashboard

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod output;
pub mod session;
pub mod task;
pub mod ui;

pub use error::{Error, Result};
