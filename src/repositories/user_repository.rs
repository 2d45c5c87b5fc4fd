use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tokio_postgres::error::SqlState;
use uuid::Uuid;

use crate::dtos::profile_dtos::ProfileUpdateIn;
use crate::errors::{ApiError, ApiResult};
use crate::models::user::{NewUser, User};

const SELECT_USER: &str = "SELECT id, username, email, password_hash, first_name, last_name, \
     role, created_at FROM users";

fn user_from_row(row: &Row) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        role: row.get("role"),
        created_at: row.get("created_at"),
    }
}

fn map_unique_violation(err: tokio_postgres::Error) -> ApiError {
    if err.code() == Some(&SqlState::UNIQUE_VIOLATION) {
        ApiError::Conflict("Username or email is already taken".to_string())
    } else {
        err.into()
    }
}

pub struct UserRepository;

impl UserRepository {
    pub async fn create(pool: &Pool, new_user: NewUser) -> ApiResult<User> {
        let client = pool.get().await?;
        let id = Uuid::new_v4();
        let row = client
            .query_one(
                "INSERT INTO users (id, username, email, password_hash, first_name, last_name, role) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7) \
                 RETURNING id, username, email, password_hash, first_name, last_name, role, created_at",
                &[
                    &id,
                    &new_user.username,
                    &new_user.email,
                    &new_user.password_hash,
                    &new_user.first_name,
                    &new_user.last_name,
                    &new_user.role,
                ],
            )
            .await
            .map_err(map_unique_violation)?;
        Ok(user_from_row(&row))
    }

    pub async fn find_by_id(pool: &Pool, user_id: Uuid) -> ApiResult<Option<User>> {
        let client = pool.get().await?;
        let sql = format!("{SELECT_USER} WHERE id = $1");
        let row = client.query_opt(sql.as_str(), &[&user_id]).await?;
        Ok(row.as_ref().map(user_from_row))
    }

    pub async fn find_by_username(pool: &Pool, username: &str) -> ApiResult<Option<User>> {
        let client = pool.get().await?;
        let sql = format!("{SELECT_USER} WHERE username = $1");
        let row = client.query_opt(sql.as_str(), &[&username]).await?;
        Ok(row.as_ref().map(user_from_row))
    }

    /// Applies only the fields present in the update.
    pub async fn update_profile(
        pool: &Pool,
        user_id: Uuid,
        changes: &ProfileUpdateIn,
    ) -> ApiResult<Option<User>> {
        let client = pool.get().await?;
        let row = client
            .query_opt(
                "UPDATE users SET \
                 username = COALESCE($1, username), \
                 email = COALESCE($2, email), \
                 first_name = COALESCE($3, first_name), \
                 last_name = COALESCE($4, last_name) \
                 WHERE id = $5 \
                 RETURNING id, username, email, password_hash, first_name, last_name, role, created_at",
                &[
                    &changes.username,
                    &changes.email,
                    &changes.first_name,
                    &changes.last_name,
                    &user_id,
                ],
            )
            .await
            .map_err(map_unique_violation)?;
        Ok(row.as_ref().map(user_from_row))
    }
}
