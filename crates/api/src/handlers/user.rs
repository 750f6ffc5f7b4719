//! Handlers for the `/users` resource.
//!
//! User management requires [`RequireAdmin`]; the leaderboard is open to any
//! authenticated user.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kaizen_core::department::Department;
use kaizen_core::error::{CoreError, FieldError};
use kaizen_core::leaderboard::{
    rank_departments, rank_individuals, DepartmentHeadcount, DepartmentStanding,
    DepartmentTally, IndividualStanding,
};
use kaizen_core::pagination::{PageInfo, PageRequest};
use kaizen_core::roles::{Capability, Role};
use kaizen_core::types::DbId;
use kaizen_core::user::{NewUserDraft, UserChangesDraft};
use kaizen_core::validation::parsed;
use kaizen_db::models::user::{CreateUser, UpdateUser, User, UserFilter};
use kaizen_db::repositories::{StatsRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ApiResponse, Page};
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 10;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /users`.
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub department: Option<String>,
    pub role: Option<String>,
}

/// Query parameters for `GET /users/leaderboard`.
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "leaderboard", rename_all = "snake_case")]
pub enum Leaderboard {
    Individual(Vec<IndividualStanding>),
    Department(Vec<DepartmentStanding>),
}

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

/// An admin editing their own account may not lock themselves out.
fn ensure_keeps_admin_access(is_active: Option<bool>, role: Option<Role>) -> AppResult<()> {
    if is_active == Some(false) {
        return Err(AppError::Core(CoreError::Conflict(
            "Admins cannot deactivate their own account".into(),
        )));
    }
    if role.is_some_and(|r| r != Role::Admin) {
        return Err(AppError::Core(CoreError::Conflict(
            "Admins cannot remove their own admin role".into(),
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

/// GET /api/v1/users
///
/// Active users sorted by name, optionally filtered by department and role.
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<UserListQuery>,
) -> AppResult<Json<ApiResponse<Page<User>>>> {
    let page = PageRequest::new(params.page, params.limit, DEFAULT_LIMIT);

    let mut errors: Vec<FieldError> = Vec::new();
    let department = params
        .department
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| parsed(Department::parse(d.trim()), "department", &mut errors))
        .map(|d| d.as_str().to_string());
    let role = params
        .role
        .filter(|r| !r.trim().is_empty())
        .and_then(|r| parsed(Role::parse(r.trim()), "role", &mut errors))
        .map(|r| r.as_str().to_string());
    CoreError::from_field_errors(errors)?;

    let filter = UserFilter { department, role };
    let items = UserRepo::list(&state.pool, &filter, page.limit, page.offset()).await?;
    let total = UserRepo::count(&state.pool, &filter).await?;

    Ok(Json(ApiResponse::data(Page {
        items,
        pagination: PageInfo::new(page, total),
    })))
}

/// POST /api/v1/users
///
/// Duplicate employee numbers or emails surface as 409 via the unique
/// constraints.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(draft): Json<NewUserDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let valid = draft.into_new_user()?;
    let input = CreateUser {
        employee_number: valid.employee_number,
        name: valid.name,
        email: valid.email,
        department: valid.department.as_str().to_string(),
        designation: valid.designation,
        role: valid.role.as_str().to_string(),
    };

    let user = UserRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.id, created_by = admin.user_id, "User created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("User created successfully", user)),
    ))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(ApiResponse::data(user)))
}

/// PUT /api/v1/users/{id}
///
/// Employee number and email are immutable; other fields are optional.
pub async fn update_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(draft): Json<UserChangesDraft>,
) -> AppResult<Json<ApiResponse<User>>> {
    let changes = draft.into_changes()?;
    if id == admin.user_id {
        ensure_keeps_admin_access(changes.is_active, changes.role)?;
    }
    let input = UpdateUser {
        name: changes.name,
        department: changes.department.map(|d| d.as_str().to_string()),
        designation: changes.designation,
        role: changes.role.map(|r| r.as_str().to_string()),
        is_active: changes.is_active,
    };

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    tracing::info!(user_id = id, updated_by = admin.user_id, "User updated");

    Ok(Json(ApiResponse::with_message(
        "User updated successfully",
        user,
    )))
}

/// DELETE /api/v1/users/{id}
///
/// Soft delete. Deactivating an already inactive user succeeds.
pub async fn deactivate_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "Admins cannot deactivate their own account".into(),
        )));
    }
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    if UserRepo::deactivate(&state.pool, id).await? {
        tracing::info!(user_id = id, deactivated_by = admin.user_id, "User deactivated");
    }

    Ok(Json(ApiResponse::message("User deactivated successfully")))
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

/// GET /api/v1/users/leaderboard?type=individual|department
pub async fn leaderboard(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LeaderboardQuery>,
) -> AppResult<Json<ApiResponse<Leaderboard>>> {
    auth.require(Capability::ViewLeaderboard)?;

    let board = match params.kind.as_deref().map(str::trim) {
        None | Some("") | Some("individual") => {
            let tallies = StatsRepo::contributor_tallies(&state.pool)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
            Leaderboard::Individual(rank_individuals(tallies))
        }
        Some("department") => {
            let tallies: Vec<DepartmentTally> = StatsRepo::department_tallies(&state.pool)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
            let headcounts: Vec<DepartmentHeadcount> =
                StatsRepo::department_headcounts(&state.pool)
                    .await?
                    .into_iter()
                    .map(Into::into)
                    .collect();
            Leaderboard::Department(rank_departments(&tallies, &headcounts))
        }
        Some(other) => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid leaderboard type '{other}'. Must be one of: individual, department"
            ))));
        }
    };

    Ok(Json(ApiResponse::data(board)))
}
