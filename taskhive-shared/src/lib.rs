//! # Taskhive Shared Library
//!
//! This crate contains the types and business logic shared between the
//! Taskhive API server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Authentication and authorization utilities
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskhive shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
