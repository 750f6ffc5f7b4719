//! Handlers for the `/ideas` resource.
//!
//! Idea writes commit first; notification fan-out runs afterwards and only
//! affects the response message.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kaizen_core::department::Department;
use kaizen_core::error::{CoreError, FieldError};
use kaizen_core::idea::{
    ensure_owner_editable, validate_transition, Benefit, IdeaDraft, IdeaStatus,
    ImageMetadataDraft, StatusChangeDraft, MAX_IMAGES_PER_IDEA,
};
use kaizen_core::pagination::{PageInfo, PageRequest};
use kaizen_core::roles::Capability;
use kaizen_core::types::DbId;
use kaizen_core::validation::parsed;
use kaizen_db::models::idea::{
    CreateIdea, CreateIdeaImage, Idea, IdeaDetail, IdeaFilter, IdeaImage, StatusTransition,
    UpdateIdea,
};
use kaizen_db::models::stats::IdeaStats;
use kaizen_db::repositories::{IdeaRepo, StatsRepo};
use kaizen_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireReviewer;
use crate::notifications::{fanout, Delivery};
use crate::response::{ApiResponse, Page};
use crate::state::AppState;

/// Default page size for idea listings.
const DEFAULT_LIMIT: i64 = 10;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /ideas` and `GET /ideas/my`.
#[derive(Debug, Default, Deserialize)]
pub struct IdeaListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub department: Option<String>,
    pub benefit: Option<String>,
    /// Submitter employee number. Ignored by `/ideas/my`.
    #[serde(alias = "submittedBy")]
    pub submitted_by: Option<String>,
    pub search: Option<String>,
}

impl IdeaListQuery {
    /// Validate enum filters and canonicalize them for the repository.
    fn into_filter(self) -> Result<IdeaFilter, CoreError> {
        fn present(value: Option<String>) -> Option<String> {
            value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        }

        let mut errors: Vec<FieldError> = Vec::new();
        let status = present(self.status)
            .and_then(|s| parsed(IdeaStatus::parse(&s), "status", &mut errors))
            .map(|s| s.as_str().to_string());
        let department = present(self.department)
            .and_then(|d| parsed(Department::parse(&d), "department", &mut errors))
            .map(|d| d.as_str().to_string());
        let benefit = present(self.benefit)
            .and_then(|b| parsed(Benefit::parse(&b), "benefit", &mut errors))
            .map(|b| b.as_str().to_string());
        CoreError::from_field_errors(errors)?;

        Ok(IdeaFilter {
            status,
            department,
            benefit,
            submitter_employee_number: present(self.submitted_by),
            submitted_by: None,
            search: present(self.search),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_idea(pool: &DbPool, id: DbId) -> AppResult<Idea> {
    IdeaRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Idea", id }))
}

/// Load an idea and check the acting user submitted it.
async fn find_own_idea(pool: &DbPool, id: DbId, auth: &AuthUser) -> AppResult<Idea> {
    auth.require(Capability::EditOwnIdea)?;
    let idea = find_idea(pool, id).await?;
    if idea.submitted_by != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the submitter can change this idea".into(),
        )));
    }
    Ok(idea)
}

/// Status column values are constrained by the schema, so a parse failure is
/// an internal error rather than bad input.
fn stored_status(idea: &Idea) -> AppResult<IdeaStatus> {
    IdeaStatus::parse(&idea.status).map_err(|e| {
        AppError::InternalError(format!("idea {} has an unknown status: {e}", idea.id))
    })
}

async fn list_page(
    pool: &DbPool,
    filter: &IdeaFilter,
    page: PageRequest,
) -> AppResult<Page<Idea>> {
    let items = IdeaRepo::list(pool, filter, page.limit, page.offset()).await?;
    let total = IdeaRepo::count(pool, filter).await?;
    Ok(Page {
        items,
        pagination: PageInfo::new(page, total),
    })
}

fn outcome_message(action: &str, delivery: Delivery) -> String {
    if delivery.is_failed() {
        format!("{action}, but notifications could not be delivered")
    } else {
        action.to_string()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/ideas
///
/// Submit a new idea. It always starts `under_review`; every active reviewer
/// and admin is notified.
pub async fn create_idea(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(draft): Json<IdeaDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<Idea>>)> {
    auth.require(Capability::SubmitIdea)?;
    let valid = draft.into_new_idea()?;

    let input = CreateIdea {
        title: valid.title,
        problem: valid.problem,
        improvement: valid.improvement,
        benefit: valid.benefit.as_str().to_string(),
        estimated_savings: valid.estimated_savings,
        department: valid.department.as_str().to_string(),
        submitted_by: auth.user_id,
        tags: valid.tags,
        priority: valid.priority.as_str().to_string(),
    };
    let idea = IdeaRepo::create(&state.pool, &input).await?;
    tracing::info!(idea_id = idea.id, user_id = auth.user_id, "Idea submitted");

    let delivery = fanout::idea_submitted(&state.pool, &idea).await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            outcome_message("Idea submitted successfully", delivery),
            idea,
        )),
    ))
}

/// GET /api/v1/ideas
///
/// Filtered, paginated listing of active ideas, newest first.
pub async fn list_ideas(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<IdeaListQuery>,
) -> AppResult<Json<ApiResponse<Page<Idea>>>> {
    auth.require(Capability::ViewIdeas)?;
    let page = PageRequest::new(params.page, params.limit, DEFAULT_LIMIT);
    let filter = params.into_filter()?;

    let result = list_page(&state.pool, &filter, page).await?;
    Ok(Json(ApiResponse::data(result)))
}

/// GET /api/v1/ideas/my
///
/// Same as [`list_ideas`], restricted to the caller's own submissions.
pub async fn list_my_ideas(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<IdeaListQuery>,
) -> AppResult<Json<ApiResponse<Page<Idea>>>> {
    auth.require(Capability::ViewIdeas)?;
    let page = PageRequest::new(params.page, params.limit, DEFAULT_LIMIT);
    let mut filter = params.into_filter()?;
    filter.submitter_employee_number = None;
    filter.submitted_by = Some(auth.user_id);

    let result = list_page(&state.pool, &filter, page).await?;
    Ok(Json(ApiResponse::data(result)))
}

/// GET /api/v1/ideas/stats
pub async fn idea_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<IdeaStats>>> {
    auth.require(Capability::ViewStats)?;
    let stats = StatsRepo::idea_stats(&state.pool).await?;
    Ok(Json(ApiResponse::data(stats)))
}

/// GET /api/v1/ideas/{id}
pub async fn get_idea(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<IdeaDetail>>> {
    auth.require(Capability::ViewIdeas)?;
    let idea = find_idea(&state.pool, id).await?;
    let images = IdeaRepo::list_images(&state.pool, id).await?;
    Ok(Json(ApiResponse::data(IdeaDetail { idea, images })))
}

/// PUT /api/v1/ideas/{id}
///
/// Owner edit of idea content, allowed only before any review.
pub async fn update_idea(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(draft): Json<IdeaDraft>,
) -> AppResult<Json<ApiResponse<Idea>>> {
    let idea = find_own_idea(&state.pool, id, &auth).await?;
    ensure_owner_editable(stored_status(&idea)?, idea.reviewed_by.is_some())?;

    let changes = draft.into_changes()?;
    if changes.is_empty() {
        return Ok(Json(ApiResponse::with_message("No changes supplied", idea)));
    }

    let input = UpdateIdea {
        title: changes.title,
        problem: changes.problem,
        improvement: changes.improvement,
        benefit: changes.benefit.map(|b| b.as_str().to_string()),
        estimated_savings: changes.estimated_savings,
        department: changes.department.map(|d| d.as_str().to_string()),
        tags: changes.tags,
        priority: changes.priority.map(|p| p.as_str().to_string()),
    };
    let updated = IdeaRepo::update_content(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Idea was reviewed while being edited".into(),
            ))
        })?;
    tracing::info!(idea_id = id, user_id = auth.user_id, "Idea edited by submitter");

    Ok(Json(ApiResponse::with_message(
        "Idea updated successfully",
        updated,
    )))
}

/// DELETE /api/v1/ideas/{id}
///
/// Owner withdrawal. The idea is soft-deleted and vanishes from every read.
pub async fn withdraw_idea(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let idea = find_own_idea(&state.pool, id, &auth).await?;
    ensure_owner_editable(stored_status(&idea)?, idea.reviewed_by.is_some())?;

    if !IdeaRepo::withdraw(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Idea was reviewed before it could be withdrawn".into(),
        )));
    }
    tracing::info!(idea_id = id, user_id = auth.user_id, "Idea withdrawn");

    Ok(Json(ApiResponse::message("Idea withdrawn successfully")))
}

/// POST /api/v1/ideas/{id}/images
///
/// Record metadata for an image the client already uploaded elsewhere.
pub async fn add_image(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(draft): Json<ImageMetadataDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<IdeaImage>>)> {
    find_own_idea(&state.pool, id, &auth).await?;
    let metadata = draft.into_metadata()?;

    let input = CreateIdeaImage {
        idea_id: id,
        filename: metadata.filename,
        original_name: metadata.original_name,
        mime_type: metadata.mime_type,
        size_bytes: metadata.size_bytes,
    };
    let image = IdeaRepo::add_image(&state.pool, &input, MAX_IMAGES_PER_IDEA)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "An idea can have at most {MAX_IMAGES_PER_IDEA} images"
            )))
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Image attached", image)),
    ))
}

/// PUT /api/v1/ideas/{id}/status
///
/// Reviewer transition along `under_review -> approved -> implementing ->
/// implemented` (or `under_review -> rejected`). The submitter is notified.
pub async fn update_status(
    RequireReviewer(auth): RequireReviewer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(draft): Json<StatusChangeDraft>,
) -> AppResult<Json<ApiResponse<Idea>>> {
    let change = draft.into_change()?;
    let idea = find_idea(&state.pool, id).await?;
    let from = stored_status(&idea)?;
    validate_transition(from, change.status)?;

    let transition = StatusTransition {
        from: from.as_str().to_string(),
        to: change.status.as_str().to_string(),
        reviewed_by: auth.user_id,
        review_comments: change.review_comments.clone(),
        actual_savings: change.actual_savings,
        mark_implemented: change.status == IdeaStatus::Implemented,
    };
    let updated = match IdeaRepo::transition_status(&state.pool, id, &transition).await? {
        Some(updated) => updated,
        None => {
            // Lost a race with another reviewer or a withdrawal.
            find_idea(&state.pool, id).await?;
            return Err(AppError::Core(CoreError::Conflict(
                "Idea status was changed by someone else; reload and try again".into(),
            )));
        }
    };
    tracing::info!(
        idea_id = id,
        reviewer_id = auth.user_id,
        from = %from,
        to = %change.status,
        "Idea status updated"
    );

    let delivery = fanout::status_changed(
        &state.pool,
        &updated,
        change.status,
        change.review_comments.as_deref(),
    )
    .await;

    Ok(Json(ApiResponse::with_message(
        outcome_message("Idea status updated successfully", delivery),
        updated,
    )))
}
