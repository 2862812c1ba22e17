/// Task model and database operations
///
/// A task is either personal (`group_id` is NULL, visible only to its
/// owner) or belongs to exactly one group (visible to all members).
/// Completion and archival are independent boolean flags, not a combined
/// state machine: a task can be archived whether or not it is completed.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL,
///     group_id UUID,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     due_date DATE,
///     is_completed BOOLEAN NOT NULL DEFAULT FALSE,
///     is_archived BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Archived tasks drop out of [`Task::list_visible`] but the rows are
/// never deleted by archiving.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task model representing a to-do item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owning user (the creator)
    pub user_id: Uuid,

    /// Group the task belongs to; NULL for personal tasks
    pub group_id: Option<Uuid>,

    /// Task title
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// Completion flag, toggled independently of archival
    pub is_completed: bool,

    /// Archival flag; archived tasks are hidden from the default listing
    pub is_archived: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning user
    pub user_id: Uuid,

    /// Optional group; None makes the task personal
    pub group_id: Option<Uuid>,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional due date
    pub due_date: Option<NaiveDate>,
}

/// A task row annotated for the caller's listing
///
/// Group tasks carry their group's name and admin id so clients can label
/// them and decide whether the viewer may delete them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskForUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub group_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub is_archived: bool,
    pub group_name: Option<String>,
    pub group_admin_id: Option<Uuid>,
}

impl Task {
    /// Creates a new task owned by `data.user_id`
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, group_id, title, description, due_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, group_id, title, description, due_date,
                      is_completed, is_archived, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.group_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.due_date)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, group_id, title, description, due_date,
                   is_completed, is_archived, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists every non-archived task visible to a user
    ///
    /// The result is the union of tasks the user owns and tasks belonging
    /// to any group the user is a member of, each annotated with the
    /// group's name and admin id when applicable.
    pub async fn list_visible(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<TaskForUser>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskForUser>(
            r#"
            SELECT t.id, t.user_id, t.group_id, t.title, t.description,
                   t.due_date, t.is_completed, t.is_archived,
                   g.name AS group_name, g.admin_id AS group_admin_id
            FROM tasks t
            LEFT JOIN groups g ON g.id = t.group_id
            WHERE t.is_archived = FALSE
              AND (
                  t.user_id = $1
                  OR t.group_id IN (
                      SELECT group_id FROM memberships WHERE user_id = $1
                  )
              )
            ORDER BY t.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates a task's editable fields by ID
    ///
    /// Title, description and due date are overwritten as given. No
    /// ownership check happens here or in the handler; only deletion is
    /// ownership-checked.
    ///
    /// # Returns
    ///
    /// True if the task existed and was updated, false otherwise
    pub async fn update_fields(
        pool: &PgPool,
        id: Uuid,
        title: &str,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, due_date = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(due_date)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sets a task's completion flag
    pub async fn set_completed(
        pool: &PgPool,
        id: Uuid,
        is_completed: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET is_completed = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(is_completed)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Archives a task
    ///
    /// The row stays in the table; it only disappears from
    /// [`Task::list_visible`].
    pub async fn archive(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET is_archived = TRUE, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a task by ID
    ///
    /// The owner-or-group-admin authorization check lives in the handler;
    /// this is the bare statement.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
