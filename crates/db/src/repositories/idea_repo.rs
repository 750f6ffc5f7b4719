//! Repository for the `ideas` and `idea_images` tables.

use kaizen_core::types::DbId;
use sqlx::PgPool;

use crate::models::idea::{
    CreateIdea, CreateIdeaImage, Idea, IdeaFilter, IdeaImage, StatusTransition, UpdateIdea,
};

/// Column list for [`Idea`], selected from `i` (ideas), `u` (submitter) and
/// `r` (reviewer).
const COLUMNS: &str = "i.id, i.title, i.problem, i.improvement, i.benefit, \
                       i.estimated_savings, i.department, i.submitted_by, \
                       u.employee_number AS submitter_employee_number, \
                       u.name AS submitter_name, u.department AS submitter_department, \
                       i.status, i.reviewed_by, \
                       r.employee_number AS reviewer_employee_number, \
                       r.name AS reviewer_name, \
                       i.reviewed_at, i.review_comments, i.implementation_date, \
                       i.actual_savings, i.tags, i.priority, i.is_active, \
                       i.created_at, i.updated_at";

const IMAGE_COLUMNS: &str =
    "id, idea_id, filename, original_name, mime_type, size_bytes, uploaded_at";

/// Listing predicates; binds `$1..=$6` in [`IdeaFilter`] field order.
const LIST_FILTER: &str = "WHERE i.is_active = true \
     AND ($1::TEXT IS NULL OR i.status = $1) \
     AND ($2::TEXT IS NULL OR i.department = $2) \
     AND ($3::TEXT IS NULL OR i.benefit = $3) \
     AND ($4::TEXT IS NULL OR u.employee_number = $4) \
     AND ($5::BIGINT IS NULL OR i.submitted_by = $5) \
     AND ($6::TEXT IS NULL \
          OR i.title ILIKE $6 OR i.problem ILIKE $6 OR i.improvement ILIKE $6)";

/// `SELECT` over `source` (a table or CTE name) joined to submitter and reviewer.
fn select_from(source: &str) -> String {
    format!(
        "SELECT {COLUMNS} FROM {source} i \
         JOIN users u ON u.id = i.submitted_by \
         LEFT JOIN users r ON r.id = i.reviewed_by"
    )
}

/// Escape `%`, `_` and `\` so user text matches literally inside `ILIKE`.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn search_pattern(filter: &IdeaFilter) -> Option<String> {
    filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", escape_like(s)))
}

/// Provides CRUD and lifecycle operations for ideas.
pub struct IdeaRepo;

impl IdeaRepo {
    /// Insert a new idea in `under_review`, returning the joined row.
    pub async fn create(pool: &PgPool, input: &CreateIdea) -> Result<Idea, sqlx::Error> {
        let query = format!(
            "WITH inserted AS ( \
                INSERT INTO ideas (title, problem, improvement, benefit, estimated_savings, \
                                   department, submitted_by, tags, priority) \
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
                RETURNING * \
             ) {}",
            select_from("inserted")
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(&input.title)
            .bind(&input.problem)
            .bind(&input.improvement)
            .bind(&input.benefit)
            .bind(input.estimated_savings)
            .bind(&input.department)
            .bind(input.submitted_by)
            .bind(&input.tags)
            .bind(&input.priority)
            .fetch_one(pool)
            .await
    }

    /// Find an active idea by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!(
            "{} WHERE i.id = $1 AND i.is_active = true",
            select_from("ideas")
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active ideas matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &IdeaFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Idea>, sqlx::Error> {
        let query = format!(
            "{} {LIST_FILTER} \
             ORDER BY i.created_at DESC, i.id DESC \
             LIMIT $7 OFFSET $8",
            select_from("ideas")
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(filter.status.as_deref())
            .bind(filter.department.as_deref())
            .bind(filter.benefit.as_deref())
            .bind(filter.submitter_employee_number.as_deref())
            .bind(filter.submitted_by)
            .bind(search_pattern(filter))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count active ideas matching `filter`.
    pub async fn count(pool: &PgPool, filter: &IdeaFilter) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM ideas i \
             JOIN users u ON u.id = i.submitted_by \
             {LIST_FILTER}"
        );
        sqlx::query_scalar(&query)
            .bind(filter.status.as_deref())
            .bind(filter.department.as_deref())
            .bind(filter.benefit.as_deref())
            .bind(filter.submitter_employee_number.as_deref())
            .bind(filter.submitted_by)
            .bind(search_pattern(filter))
            .fetch_one(pool)
            .await
    }

    /// Apply an owner edit. Only non-`None` fields are written.
    ///
    /// Returns `None` unless the idea is active, still `under_review` and has
    /// never been reviewed.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        input: &UpdateIdea,
    ) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!(
            "WITH updated AS ( \
                UPDATE ideas SET \
                    title = COALESCE($2, title), \
                    problem = COALESCE($3, problem), \
                    improvement = COALESCE($4, improvement), \
                    benefit = COALESCE($5, benefit), \
                    estimated_savings = COALESCE($6, estimated_savings), \
                    department = COALESCE($7, department), \
                    tags = COALESCE($8, tags), \
                    priority = COALESCE($9, priority) \
                WHERE id = $1 AND is_active = true \
                  AND status = 'under_review' AND reviewed_by IS NULL \
                RETURNING * \
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.problem)
            .bind(&input.improvement)
            .bind(&input.benefit)
            .bind(input.estimated_savings)
            .bind(&input.department)
            .bind(&input.tags)
            .bind(&input.priority)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an idea that is still `under_review`.
    ///
    /// Returns `true` if the row was updated.
    pub async fn withdraw(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE ideas SET is_active = false \
             WHERE id = $1 AND is_active = true AND status = 'under_review'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move an idea from `transition.from` to `transition.to`, stamping the
    /// reviewer and review time.
    ///
    /// The update only applies while the stored status still equals
    /// `transition.from`; otherwise `None` is returned and nothing changes.
    pub async fn transition_status(
        pool: &PgPool,
        id: DbId,
        transition: &StatusTransition,
    ) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!(
            "WITH updated AS ( \
                UPDATE ideas SET \
                    status = $3, \
                    reviewed_by = $4, \
                    reviewed_at = NOW(), \
                    review_comments = COALESCE($5, review_comments), \
                    actual_savings = COALESCE($6, actual_savings), \
                    implementation_date = CASE WHEN $7 THEN NOW() ELSE implementation_date END \
                WHERE id = $1 AND status = $2 AND is_active = true \
                RETURNING * \
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(id)
            .bind(&transition.from)
            .bind(&transition.to)
            .bind(transition.reviewed_by)
            .bind(&transition.review_comments)
            .bind(transition.actual_savings)
            .bind(transition.mark_implemented)
            .fetch_optional(pool)
            .await
    }

    /// Record image metadata while the idea holds fewer than `max_images`.
    ///
    /// The idea row is locked for the duration so concurrent attaches are
    /// counted one at a time. Returns `None` when the limit is already
    /// reached or the idea no longer exists.
    pub async fn add_image(
        pool: &PgPool,
        input: &CreateIdeaImage,
        max_images: i64,
    ) -> Result<Option<IdeaImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM ideas WHERE id = $1 AND is_active = true FOR UPDATE")
                .bind(input.idea_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO idea_images (idea_id, filename, original_name, mime_type, size_bytes) \
             SELECT $1, $2, $3, $4, $5 \
             WHERE (SELECT COUNT(*) FROM idea_images WHERE idea_id = $1) < $6 \
             RETURNING {IMAGE_COLUMNS}"
        );
        let image = sqlx::query_as::<_, IdeaImage>(&query)
            .bind(input.idea_id)
            .bind(&input.filename)
            .bind(&input.original_name)
            .bind(&input.mime_type)
            .bind(input.size_bytes)
            .bind(max_images)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// Image metadata for an idea, oldest first.
    pub async fn list_images(pool: &PgPool, idea_id: DbId) -> Result<Vec<IdeaImage>, sqlx::Error> {
        let query = format!(
            "SELECT {IMAGE_COLUMNS} FROM idea_images WHERE idea_id = $1 ORDER BY uploaded_at, id"
        );
        sqlx::query_as::<_, IdeaImage>(&query)
            .bind(idea_id)
            .fetch_all(pool)
            .await
    }
}
