/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Signup and login
/// - `account`: Self-service profile, password, and account deletion
/// - `tasks`: Personal and group to-do tasks
/// - `groups`: Groups and invite-code based membership

pub mod account;
pub mod auth;
pub mod groups;
pub mod health;
pub mod tasks;
