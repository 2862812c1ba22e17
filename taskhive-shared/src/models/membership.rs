/// Membership model and database operations
///
/// Memberships link users to groups with a role. There are exactly two
/// roles: a group has one `admin` (its creator, whose membership row is
/// inserted right after the group itself) and any number of `member` rows
/// created through invite-code joins.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE membership_role AS ENUM ('admin', 'member');
///
/// CREATE TABLE memberships (
///     group_id UUID NOT NULL,
///     user_id UUID NOT NULL,
///     role membership_role NOT NULL DEFAULT 'member',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (group_id, user_id)
/// );
/// ```
///
/// The admin row is never removed on its own: admins cannot leave a group,
/// only delete it (which removes all membership rows as a second step).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Role a user holds within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "membership_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MembershipRole {
    /// The group's creator; can delete the group but not leave it
    Admin,

    /// Joined via invite code; can leave and rejoin freely
    Member,
}

impl MembershipRole {
    /// Converts the role to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipRole::Admin => "admin",
            MembershipRole::Member => "member",
        }
    }
}

/// Membership model representing a user-group relationship
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    /// Group ID
    pub group_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the group
    pub role: MembershipRole,

    /// When the membership was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new membership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMembership {
    /// Group ID
    pub group_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role to assign
    pub role: MembershipRole,
}

/// A group member joined with their account name
///
/// Produced by [`Membership::list_members`] for the group member view.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GroupMember {
    pub user_id: Uuid,
    pub name: String,
    pub role: MembershipRole,
}

impl Membership {
    /// Creates a new membership (adds a user to a group)
    ///
    /// # Errors
    ///
    /// Returns an error if the (group, user) pair already exists; this
    /// composite-key violation is how "already a member" is detected,
    /// there is no prior existence check.
    pub async fn create(pool: &PgPool, data: CreateMembership) -> Result<Self, sqlx::Error> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO memberships (group_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING group_id, user_id, role, created_at
            "#,
        )
        .bind(data.group_id)
        .bind(data.user_id)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Ok(membership)
    }

    /// Checks whether a user belongs to a group (any role)
    pub async fn is_member(
        pool: &PgPool,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM memberships
                WHERE group_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Deletes a membership (removes a user from a group)
    ///
    /// # Returns
    ///
    /// True if a row was removed, false if the user wasn't a member
    pub async fn delete(
        pool: &PgPool,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM memberships WHERE group_id = $1 AND user_id = $2")
            .bind(group_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes every membership row for a group
    ///
    /// Used as the second, non-transactional step of group deletion.
    ///
    /// # Returns
    ///
    /// Number of membership rows removed
    pub async fn delete_by_group(pool: &PgPool, group_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM memberships WHERE group_id = $1")
            .bind(group_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Lists the members of a group with their names and roles
    pub async fn list_members(
        pool: &PgPool,
        group_id: Uuid,
    ) -> Result<Vec<GroupMember>, sqlx::Error> {
        let members = sqlx::query_as::<_, GroupMember>(
            r#"
            SELECT m.user_id, u.name, m.role
            FROM memberships m
            INNER JOIN users u ON u.id = m.user_id
            WHERE m.group_id = $1
            ORDER BY m.created_at ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(pool)
        .await?;

        Ok(members)
    }

    /// Counts membership rows for a group with a given role
    pub async fn count_by_role(
        pool: &PgPool,
        group_id: Uuid,
        role: MembershipRole,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM memberships WHERE group_id = $1 AND role = $2")
                .bind(group_id)
                .bind(role)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_role_as_str() {
        assert_eq!(MembershipRole::Admin.as_str(), "admin");
        assert_eq!(MembershipRole::Member.as_str(), "member");
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&MembershipRole::Member).unwrap();
        assert_eq!(json, "\"member\"");

        let role: MembershipRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, MembershipRole::Admin);
    }

    // Database operations are covered by the API integration tests.
}
