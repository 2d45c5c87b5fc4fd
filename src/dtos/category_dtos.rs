use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::category::Category;

use super::post_dtos::PostListOut;

#[derive(Debug, Deserialize)]
pub struct CategoryIn {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct CategoryOut {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryOut {
    fn from(cat: Category) -> Self {
        CategoryOut {
            id: cat.id,
            title: cat.title,
            description: cat.description,
            slug: cat.slug,
            is_published: cat.is_published,
            created_at: cat.created_at,
        }
    }
}

/// Category page: the category itself plus its visible posts.
#[derive(Debug, Serialize)]
pub struct CategoryPostsOut {
    pub category: CategoryOut,
    #[serde(flatten)]
    pub page: PostListOut,
}
