/// Group and membership endpoints
///
/// # Endpoints
///
/// - `POST /groups/create` - Create a group, caller becomes admin
/// - `GET /groups` - List groups the caller belongs to
/// - `POST /groups/join` - Join a group by invite code
/// - `POST /groups/leave` - Leave a group (members only)
/// - `DELETE /groups/:group_id` - Delete a group (admin only)
/// - `GET /groups/:group_id/members` - List a group's members
///
/// Create and delete are both two-statement operations with no
/// transaction boundary; a failure between the statements leaves a
/// group without memberships (or memberships without a group). See
/// DESIGN.md.

use crate::{
    app::AppState,
    error::{is_unique_violation, ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskhive_shared::{
    auth::{
        invite::{generate_invite_code, validate_invite_code_format},
        middleware::AuthContext,
    },
    models::{
        group::{CreateGroup, Group, GroupForUser},
        membership::{CreateMembership, Membership, MembershipRole},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Group creation request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 255, message = "Group name must be 1-255 characters"))]
    pub group_name: String,

    pub description: Option<String>,
}

/// Group creation response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupResponse {
    pub message: String,
    pub invite_code: String,
}

/// Join-by-code request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGroupRequest {
    pub invite_code: String,
}

/// Leave request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveGroupRequest {
    pub group_id: Uuid,
}

/// A group as returned by the listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub admin_id: Uuid,
    /// Visible to every member, not just the admin; clients decide
    /// whether to display it
    pub invite_code: String,
    pub is_admin: bool,
}

impl From<GroupForUser> for GroupItem {
    fn from(g: GroupForUser) -> Self {
        Self {
            id: g.id,
            name: g.name,
            description: g.description,
            admin_id: g.admin_id,
            invite_code: g.invite_code,
            is_admin: g.is_admin,
        }
    }
}

/// A member row in the member listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberItem {
    pub user_id: Uuid,
    pub name: String,
    pub role: String,
}

/// Generic confirmation response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create a group with the caller as admin
///
/// Inserts the group row, then the caller's admin membership as a
/// second statement. If the membership insert fails the group row is
/// left behind without members.
pub async fn create_group(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateGroupRequest>,
) -> ApiResult<(StatusCode, Json<CreateGroupResponse>)> {
    req.validate()?;

    let invite_code = generate_invite_code();

    let group = Group::create(
        &state.db,
        CreateGroup {
            name: req.group_name,
            description: req.description,
            admin_id: auth.user_id,
            invite_code: invite_code.clone(),
        },
    )
    .await?;

    Membership::create(
        &state.db,
        CreateMembership {
            group_id: group.id,
            user_id: auth.user_id,
            role: MembershipRole::Admin,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateGroupResponse {
            message: "Group created successfully".to_string(),
            invite_code,
        }),
    ))
}

/// List every group the caller is a member of
pub async fn list_groups(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<GroupItem>>> {
    let groups = Group::list_for_user(&state.db, auth.user_id).await?;

    Ok(Json(groups.into_iter().map(GroupItem::from).collect()))
}

/// Join a group by invite code
///
/// Duplicate membership is detected by the unique-violation on the
/// (group, user) pair rather than a prior existence check.
///
/// # Errors
///
/// - `400 Bad Request`: Malformed invite code, or caller is already a
///   member
/// - `404 Not Found`: No group with that invite code
pub async fn join_group(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<JoinGroupRequest>,
) -> ApiResult<Json<MessageResponse>> {
    // A code that fails the format check can never match a stored one
    if !validate_invite_code_format(&req.invite_code) {
        return Err(ApiError::BadRequest("Invalid invite code".to_string()));
    }

    let group = Group::find_by_invite_code(&state.db, &req.invite_code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found".to_string()))?;

    let result = Membership::create(
        &state.db,
        CreateMembership {
            group_id: group.id,
            user_id: auth.user_id,
            role: MembershipRole::Member,
        },
    )
    .await;

    match result {
        Ok(_) => Ok(Json(MessageResponse {
            message: "Joined group successfully".to_string(),
        })),
        Err(ref e) if is_unique_violation(e) => Err(ApiError::BadRequest(
            "Already a member of this group".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Leave a group
///
/// Admins cannot leave; they must delete the group instead.
///
/// # Errors
///
/// - `403 Forbidden`: Caller is the group's admin
/// - `404 Not Found`: No such group, or caller is not a member
pub async fn leave_group(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<LeaveGroupRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let group = Group::find_by_id(&state.db, req.group_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found".to_string()))?;

    if group.admin_id == auth.user_id {
        return Err(ApiError::Forbidden(
            "Admins cannot leave their own group".to_string(),
        ));
    }

    let removed = Membership::delete(&state.db, group.id, auth.user_id).await?;

    if !removed {
        return Err(ApiError::NotFound(
            "You are not a member of this group".to_string(),
        ));
    }

    Ok(Json(MessageResponse {
        message: "Left group successfully".to_string(),
    }))
}

/// Delete a group and its membership rows
///
/// The group row is removed first, then all memberships as a second
/// statement.
///
/// # Errors
///
/// - `403 Forbidden`: Caller is not the group's admin
/// - `404 Not Found`: No such group
pub async fn delete_group(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let group = Group::find_by_id(&state.db, group_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found".to_string()))?;

    if group.admin_id != auth.user_id {
        return Err(ApiError::Forbidden(
            "You are not authorized to delete this group".to_string(),
        ));
    }

    Group::delete(&state.db, group_id).await?;
    Membership::delete_by_group(&state.db, group_id).await?;

    Ok(Json(MessageResponse {
        message: "Group deleted successfully".to_string(),
    }))
}

/// List a group's members with their roles
///
/// # Errors
///
/// - `403 Forbidden`: Caller is not a member of the group
pub async fn list_members(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<Json<Vec<MemberItem>>> {
    if !Membership::is_member(&state.db, group_id, auth.user_id).await? {
        return Err(ApiError::Forbidden(
            "You are not a member of this group".to_string(),
        ));
    }

    let members = Membership::list_members(&state.db, group_id).await?;

    Ok(Json(
        members
            .into_iter()
            .map(|m| MemberItem {
                user_id: m.user_id,
                name: m.name,
                role: m.role.as_str().to_string(),
            })
            .collect(),
    ))
}
