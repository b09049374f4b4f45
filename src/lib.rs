//! Tareas - a small task and project tracker
//!
//! This crate provides the core functionality for the `tareas` CLI and
//! its HTTP server.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Task, Project)
//! - [`storage`] - SQLite database layer (task store, project store)
//! - [`web`] - HTTP request layer using axum
//! - [`config`] - Database path and bind address resolution
//! - [`error`] - Error types and exit codes

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod web;

pub use error::{Error, Result};
