use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tokio_postgres::error::SqlState;
use uuid::Uuid;

use crate::errors::{ApiError, ApiResult};
use crate::models::category::{Category, NewCategory};

const SELECT_CATEGORY: &str =
    "SELECT id, title, description, slug, is_published, created_at FROM categories";

fn category_from_row(row: &Row) -> Category {
    Category {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        slug: row.get("slug"),
        is_published: row.get("is_published"),
        created_at: row.get("created_at"),
    }
}

pub struct CategoryRepository;

impl CategoryRepository {
    pub async fn list_published(pool: &Pool) -> ApiResult<Vec<Category>> {
        let client = pool.get().await?;
        let sql = format!("{SELECT_CATEGORY} WHERE is_published ORDER BY title ASC");
        let rows = client.query(sql.as_str(), &[]).await?;
        Ok(rows.iter().map(category_from_row).collect())
    }

    /// The category page 404s on unpublished categories, hence the flag in
    /// the lookup itself.
    pub async fn find_published_by_slug(pool: &Pool, slug: &str) -> ApiResult<Option<Category>> {
        let client = pool.get().await?;
        let sql = format!("{SELECT_CATEGORY} WHERE slug = $1 AND is_published");
        let row = client.query_opt(sql.as_str(), &[&slug]).await?;
        Ok(row.as_ref().map(category_from_row))
    }

    /// Unfiltered lookup, used when attaching a category to a post.
    pub async fn find_by_id(pool: &Pool, category_id: Uuid) -> ApiResult<Option<Category>> {
        let client = pool.get().await?;
        let sql = format!("{SELECT_CATEGORY} WHERE id = $1");
        let row = client.query_opt(sql.as_str(), &[&category_id]).await?;
        Ok(row.as_ref().map(category_from_row))
    }

    pub async fn insert(pool: &Pool, new_category: NewCategory) -> ApiResult<Category> {
        let client = pool.get().await?;
        let id = Uuid::new_v4();
        let row = client
            .query_one(
                "INSERT INTO categories (id, title, description, slug, is_published) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING id, title, description, slug, is_published, created_at",
                &[
                    &id,
                    &new_category.title,
                    &new_category.description,
                    &new_category.slug,
                    &new_category.is_published,
                ],
            )
            .await
            .map_err(|e| {
                if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                    ApiError::Conflict(format!(
                        "Category slug '{}' is already in use",
                        new_category.slug
                    ))
                } else {
                    e.into()
                }
            })?;
        Ok(category_from_row(&row))
    }
}
