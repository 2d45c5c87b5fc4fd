use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::comment;
use crate::repositories::comment_repository::CommentWithAuthor;

#[derive(Debug, Deserialize)]
pub struct CommentIn {
    pub text: String,
}

impl CommentIn {
    pub fn validate(&self) -> Result<(), String> {
        comment::validate_text(&self.text)
    }
}

#[derive(Debug, Serialize)]
pub struct CommentOut {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub is_own_comment: bool,
}

impl CommentOut {
    pub fn from_row(row: CommentWithAuthor, viewer: Option<Uuid>) -> Self {
        let is_own_comment = viewer == Some(row.comment.author_id);
        CommentOut {
            id: row.comment.id,
            post_id: row.comment.post_id,
            author_id: row.comment.author_id,
            author_username: row.author_username,
            text: row.comment.text,
            created_at: row.comment.created_at,
            is_own_comment,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentListOut {
    pub comments: Vec<CommentOut>,
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
}
