/// Group model and database operations
///
/// A group is a shared task list owned by exactly one admin (its creator).
/// Other users join via the group's invite code and hold memberships with
/// the `member` role.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE groups (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     description TEXT,
///     admin_id UUID NOT NULL,
///     invite_code VARCHAR(6) NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// The invite code is a 6-character uppercase-hex token generated at
/// creation time (see `auth::invite`). The unique constraint guarantees a
/// code identifies at most one live group.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Group model representing a shared task list
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Group {
    /// Unique group ID
    pub id: Uuid,

    /// Group name
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// User ID of the group's admin (its creator)
    pub admin_id: Uuid,

    /// Public join token, 6 uppercase hex characters
    pub invite_code: String,

    /// When the group was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroup {
    /// Group name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Creator's user ID; becomes the admin
    pub admin_id: Uuid,

    /// Pre-generated invite code
    pub invite_code: String,
}

/// A group as seen by one of its members
///
/// Produced by [`Group::list_for_user`]; `is_admin` compares the stored
/// admin id against the caller.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GroupForUser {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub admin_id: Uuid,
    pub invite_code: String,
    pub is_admin: bool,
}

impl Group {
    /// Creates a new group
    ///
    /// The caller is responsible for inserting the admin's own membership
    /// row afterwards; the two inserts are separate statements.
    ///
    /// # Errors
    ///
    /// Returns an error if the invite code collides (unique constraint)
    /// or the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateGroup) -> Result<Self, sqlx::Error> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO groups (name, description, admin_id, invite_code)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, admin_id, invite_code, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.admin_id)
        .bind(data.invite_code)
        .fetch_one(pool)
        .await?;

        Ok(group)
    }

    /// Finds a group by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            SELECT id, name, description, admin_id, invite_code, created_at
            FROM groups
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(group)
    }

    /// Finds a group by its invite code
    ///
    /// This is the self-service join path: a user submits a code they were
    /// given out of band.
    pub async fn find_by_invite_code(
        pool: &PgPool,
        invite_code: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            SELECT id, name, description, admin_id, invite_code, created_at
            FROM groups
            WHERE invite_code = $1
            "#,
        )
        .bind(invite_code)
        .fetch_optional(pool)
        .await?;

        Ok(group)
    }

    /// Lists every group a user belongs to
    ///
    /// Each row carries an `is_admin` flag. The invite code is returned
    /// for all members, not just the admin; restricting its display is
    /// left to clients.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<GroupForUser>, sqlx::Error> {
        let groups = sqlx::query_as::<_, GroupForUser>(
            r#"
            SELECT g.id, g.name, g.description, g.admin_id, g.invite_code,
                   (g.admin_id = $1) AS is_admin
            FROM groups g
            INNER JOIN memberships m ON m.group_id = g.id
            WHERE m.user_id = $1
            ORDER BY g.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(groups)
    }

    /// Deletes a group by ID
    ///
    /// Removes only the group row; membership cleanup is a separate,
    /// follow-up statement in the handler.
    ///
    /// # Returns
    ///
    /// True if the group was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_group_struct() {
        let create = CreateGroup {
            name: "Weekend Projects".to_string(),
            description: Some("Shared chores".to_string()),
            admin_id: Uuid::new_v4(),
            invite_code: "AB12C3".to_string(),
        };

        assert_eq!(create.invite_code.len(), 6);
        assert!(create.description.is_some());
    }

    // Database operations are covered by the API integration tests.
}
