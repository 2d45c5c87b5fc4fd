use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::errors::ApiResult;
use crate::models::comment::Comment;

/// A comment joined with its author's username for rendering.
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author_username: String,
}

const SELECT_COMMENT: &str = "SELECT cm.id, cm.text, cm.post_id, cm.author_id, cm.created_at, \
     u.username AS author_username \
     FROM comments cm \
     JOIN users u ON u.id = cm.author_id";

fn comment_from_row(row: &Row) -> CommentWithAuthor {
    CommentWithAuthor {
        comment: Comment {
            id: row.get("id"),
            text: row.get("text"),
            post_id: row.get("post_id"),
            author_id: row.get("author_id"),
            created_at: row.get("created_at"),
        },
        author_username: row.get("author_username"),
    }
}

pub struct CommentRepository;

impl CommentRepository {
    /// Comments of a post, oldest first.
    pub async fn list_for_post(
        pool: &Pool,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<CommentWithAuthor>> {
        let client = pool.get().await?;
        let sql = format!(
            "{SELECT_COMMENT} WHERE cm.post_id = $1 \
             ORDER BY cm.created_at ASC LIMIT $2 OFFSET $3"
        );
        let rows = client.query(sql.as_str(), &[&post_id, &limit, &offset]).await?;
        Ok(rows.iter().map(comment_from_row).collect())
    }

    pub async fn count_for_post(pool: &Pool, post_id: Uuid) -> ApiResult<i64> {
        let client = pool.get().await?;
        let row = client
            .query_one("SELECT COUNT(*) FROM comments WHERE post_id = $1", &[&post_id])
            .await?;
        Ok(row.get(0))
    }

    pub async fn insert(
        pool: &Pool,
        post_id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> ApiResult<CommentWithAuthor> {
        let client = pool.get().await?;
        let id = Uuid::new_v4();
        let row = client
            .query_one(
                "WITH inserted AS (\
                 INSERT INTO comments (id, text, post_id, author_id) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING id, text, post_id, author_id, created_at\
                 ) \
                 SELECT i.id, i.text, i.post_id, i.author_id, i.created_at, \
                 u.username AS author_username \
                 FROM inserted i JOIN users u ON u.id = i.author_id",
                &[&id, &text, &post_id, &author_id],
            )
            .await?;
        Ok(comment_from_row(&row))
    }

    /// Scoped to the post so a comment id from another post's URL is a miss.
    pub async fn find_in_post(
        pool: &Pool,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> ApiResult<Option<CommentWithAuthor>> {
        let client = pool.get().await?;
        let sql = format!("{SELECT_COMMENT} WHERE cm.id = $1 AND cm.post_id = $2");
        let row = client.query_opt(sql.as_str(), &[&comment_id, &post_id]).await?;
        Ok(row.as_ref().map(comment_from_row))
    }

    pub async fn update_text(pool: &Pool, comment_id: Uuid, text: &str) -> ApiResult<bool> {
        let client = pool.get().await?;
        let updated = client
            .execute(
                "UPDATE comments SET text = $1 WHERE id = $2",
                &[&text, &comment_id],
            )
            .await?;
        Ok(updated > 0)
    }

    pub async fn delete(pool: &Pool, comment_id: Uuid) -> ApiResult<bool> {
        let client = pool.get().await?;
        let deleted = client
            .execute("DELETE FROM comments WHERE id = $1", &[&comment_id])
            .await?;
        Ok(deleted > 0)
    }
}
