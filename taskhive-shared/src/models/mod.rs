/// Database models for Taskhive
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and authentication
/// - `group`: Shared task groups with an owning admin and invite code
/// - `membership`: User-group relationships with roles
/// - `task`: Personal and group to-do tasks

pub mod group;
pub mod membership;
pub mod task;
pub mod user;
