use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::post;
use crate::repositories::post_repository::PostWithMeta;

/// Create/replace payload. The author and the publication flag on create are
/// server-set; `PUT` may toggle `is_published` to hide an own post.
#[derive(Debug, Deserialize)]
pub struct PostIn {
    pub title: String,
    pub text: String,
    /// Defaults to now; a future instant schedules the post.
    pub pub_date: Option<DateTime<Utc>>,
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}

impl PostIn {
    pub fn validate(&self) -> Result<(), String> {
        post::validate_title(&self.title)?;
        post::validate_text(&self.text)
    }
}

#[derive(Debug, Serialize)]
pub struct PostOut {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub author_username: String,
    pub location_name: Option<String>,
    pub category_title: Option<String>,
    pub category_slug: Option<String>,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub comment_count: i64,
    pub is_own_post: bool,
}

impl PostOut {
    pub fn from_meta(meta: PostWithMeta, viewer: Option<Uuid>) -> Self {
        let is_own_post = viewer == Some(meta.post.author_id);
        PostOut {
            id: meta.post.id,
            title: meta.post.title,
            text: meta.post.text,
            pub_date: meta.post.pub_date,
            author_id: meta.post.author_id,
            author_username: meta.author_username,
            location_name: meta.location_name,
            category_title: meta.category_title,
            category_slug: meta.category_slug,
            image_url: meta.post.image_url,
            is_published: meta.post.is_published,
            created_at: meta.post.created_at,
            comment_count: meta.comment_count,
            is_own_post,
        }
    }
}

/// Page of posts with the pagination echo, so clients can page without
/// counting on their own.
#[derive(Debug, Serialize)]
pub struct PostListOut {
    pub posts: Vec<PostOut>,
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_in_validation() {
        let body = PostIn {
            title: "Evening notes".into(),
            text: "Long day.".into(),
            pub_date: None,
            location_id: None,
            category_id: None,
            image_url: None,
            is_published: None,
        };
        assert!(body.validate().is_ok());

        let empty_title = PostIn {
            title: " ".into(),
            ..body
        };
        assert!(empty_title.validate().is_err());
    }
}
