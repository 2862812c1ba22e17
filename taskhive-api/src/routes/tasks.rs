/// Task endpoints
///
/// # Endpoints
///
/// - `POST /tasks/create` - Create a personal or group task
/// - `GET /tasks` - List tasks visible to the caller
/// - `PUT /tasks/:id` - Update title/description/due date
/// - `PUT /tasks/:id/toggle-complete` - Set the completion flag
/// - `PUT /tasks/:id/archive` - Hide the task from the default listing
/// - `DELETE /tasks/:id` - Delete (owner or group admin only)
///
/// Update, toggle and archive are NOT ownership-checked; only delete is.
/// The asymmetry matches the observed design (see DESIGN.md).

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taskhive_shared::{
    auth::middleware::AuthContext,
    models::{
        group::Group,
        task::{CreateTask, Task, TaskForUser},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Task creation request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    pub description: Option<String>,

    pub due_date: Option<NaiveDate>,

    /// Target group; omitted or null makes the task personal
    pub group_id: Option<Uuid>,
}

/// Task update request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    pub description: Option<String>,

    pub due_date: Option<NaiveDate>,
}

/// Completion toggle request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleCompleteRequest {
    pub is_completed: bool,
}

/// A task as returned by the listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub group_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub is_archived: bool,
    /// Group name, present for group tasks only
    pub group_name: Option<String>,
    /// Group admin id, present for group tasks only
    pub group_admin_id: Option<Uuid>,
}

impl From<TaskForUser> for TaskItem {
    fn from(t: TaskForUser) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            group_id: t.group_id,
            title: t.title,
            description: t.description,
            due_date: t.due_date,
            is_completed: t.is_completed,
            is_archived: t.is_archived,
            group_name: t.group_name,
            group_admin_id: t.group_admin_id,
        }
    }
}

/// Generic confirmation response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create a task owned by the caller
///
/// A null/omitted `groupId` makes the task personal; group membership is
/// not re-checked here.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    req.validate()?;

    Task::create(
        &state.db,
        CreateTask {
            user_id: auth.user_id,
            group_id: req.group_id,
            title: req.title,
            description: req.description,
            due_date: req.due_date,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Task created successfully".to_string(),
        }),
    ))
}

/// List every non-archived task visible to the caller
///
/// Union of owned tasks and tasks in any group the caller belongs to,
/// annotated with group name and admin id where applicable.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<TaskItem>>> {
    let tasks = Task::list_visible(&state.db, auth.user_id).await?;

    Ok(Json(tasks.into_iter().map(TaskItem::from).collect()))
}

/// Update a task's title, description and due date
///
/// No ownership check: any authenticated caller who knows the id can
/// update. 404 if the task doesn't exist.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<MessageResponse>> {
    req.validate()?;

    let updated = Task::update_fields(
        &state.db,
        id,
        &req.title,
        req.description.as_deref(),
        req.due_date,
    )
    .await?;

    if !updated {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Task updated successfully".to_string(),
    }))
}

/// Set a task's completion flag
pub async fn toggle_complete(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<ToggleCompleteRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let updated = Task::set_completed(&state.db, id, req.is_completed).await?;

    if !updated {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Task updated successfully".to_string(),
    }))
}

/// Archive a task
///
/// The task drops out of the default listing; the row itself remains.
pub async fn archive_task(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let updated = Task::archive(&state.db, id).await?;

    if !updated {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Task archived successfully".to_string(),
    }))
}

/// Delete a task
///
/// Permitted only for the task's owner or, for group tasks, the group's
/// admin.
///
/// # Errors
///
/// - `403 Forbidden`: Caller is neither owner nor group admin
/// - `404 Not Found`: No such task
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let mut authorized = task.user_id == auth.user_id;

    if !authorized {
        if let Some(group_id) = task.group_id {
            if let Some(group) = Group::find_by_id(&state.db, group_id).await? {
                authorized = group.admin_id == auth.user_id;
            }
        }
    }

    if !authorized {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    Task::delete(&state.db, id).await?;

    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
