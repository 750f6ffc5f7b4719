//! Repository for the `users` table.

use kaizen_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User, UserFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, employee_number, name, email, department, designation, role, \
                       is_active, last_login_at, created_at, updated_at";

/// Shared `WHERE` for the admin listing: active users, optional department/role.
const LIST_FILTER: &str = "WHERE is_active = true \
                           AND ($1::TEXT IS NULL OR department = $1) \
                           AND ($2::TEXT IS NULL OR role = $2)";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Duplicate employee numbers or emails fail with the `uq_users_*`
    /// constraint.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (employee_number, name, email, department, designation, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.employee_number)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.department)
            .bind(&input.designation)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by employee number (exact match).
    pub async fn find_by_employee_number(
        pool: &PgPool,
        employee_number: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE employee_number = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(employee_number)
            .fetch_optional(pool)
            .await
    }

    /// List active users ordered by name.
    pub async fn list(
        pool: &PgPool,
        filter: &UserFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users {LIST_FILTER}
             ORDER BY name ASC, id ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(filter.department.as_deref())
            .bind(filter.role.as_deref())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count active users matching `filter`.
    pub async fn count(pool: &PgPool, filter: &UserFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM users {LIST_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.department.as_deref())
            .bind(filter.role.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                department = COALESCE($3, department),
                designation = COALESCE($4, designation),
                role = COALESCE($5, role),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.department)
            .bind(&input.designation)
            .bind(&input.role)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate a user by setting `is_active = false`.
    ///
    /// Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Stamp `last_login_at` with the current time.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// IDs of active users holding any of `roles`, ordered by id.
    pub async fn list_active_ids_by_roles(
        pool: &PgPool,
        roles: &[&str],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        sqlx::query_scalar(
            "SELECT id FROM users WHERE is_active = true AND role = ANY($1) ORDER BY id",
        )
        .bind(&roles)
        .fetch_all(pool)
        .await
    }

    /// Whether the `users` table has any rows.
    pub async fn any_exist(pool: &PgPool) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users)")
            .fetch_one(pool)
            .await
    }
}
