use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::errors::ApiResult;
use crate::models::post::Post;

/// A post joined with everything the API renders alongside it: author
/// username, taxonomy labels, the category's publication flag (needed by the
/// visibility check) and the comment count.
#[derive(Debug, Clone)]
pub struct PostWithMeta {
    pub post: Post,
    pub author_username: String,
    pub location_name: Option<String>,
    pub category_title: Option<String>,
    pub category_slug: Option<String>,
    pub category_is_published: Option<bool>,
    pub comment_count: i64,
}

impl PostWithMeta {
    /// The visibility rule, in one place. A post is publicly visible when it
    /// is published, its publication instant has passed, and it sits in a
    /// published category; a post without a category is not public. The
    /// owning author sees their own posts unconditionally.
    ///
    /// The SQL twin of this predicate is [`VISIBLE_WHERE`]; the two must
    /// agree.
    pub fn visible_to(&self, viewer: Option<Uuid>, now: DateTime<Utc>) -> bool {
        if viewer == Some(self.post.author_id) {
            return true;
        }
        self.post.is_published
            && self.post.pub_date <= now
            && self.category_is_published.unwrap_or(false)
    }
}

/// Insert payload for `posts`.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub is_published: bool,
}

/// Full-replace update payload for `posts`.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub is_published: bool,
}

/// SQL twin of [`PostWithMeta::visible_to`] for list queries, with `c` bound
/// to the post's category. `COALESCE` keeps uncategorized posts out, matching
/// the predicate's treatment of a missing category.
const VISIBLE_WHERE: &str =
    "(p.pub_date <= now() AND p.is_published AND COALESCE(c.is_published, FALSE))";

const SELECT_META: &str = "SELECT p.id, p.title, p.text, p.pub_date, p.author_id, \
     p.location_id, p.category_id, p.image_url, p.is_published, p.created_at, \
     u.username AS author_username, \
     l.name AS location_name, \
     c.title AS category_title, c.slug AS category_slug, \
     c.is_published AS category_is_published, \
     (SELECT COUNT(*) FROM comments cm WHERE cm.post_id = p.id) AS comment_count \
     FROM posts p \
     JOIN users u ON u.id = p.author_id \
     LEFT JOIN locations l ON l.id = p.location_id \
     LEFT JOIN categories c ON c.id = p.category_id";

const COUNT_BASE: &str = "SELECT COUNT(*) FROM posts p \
     LEFT JOIN categories c ON c.id = p.category_id";

fn meta_from_row(row: &Row) -> PostWithMeta {
    PostWithMeta {
        post: Post {
            id: row.get("id"),
            title: row.get("title"),
            text: row.get("text"),
            pub_date: row.get("pub_date"),
            author_id: row.get("author_id"),
            location_id: row.get("location_id"),
            category_id: row.get("category_id"),
            image_url: row.get("image_url"),
            is_published: row.get("is_published"),
            created_at: row.get("created_at"),
        },
        author_username: row.get("author_username"),
        location_name: row.get("location_name"),
        category_title: row.get("category_title"),
        category_slug: row.get("category_slug"),
        category_is_published: row.get("category_is_published"),
        comment_count: row.get("comment_count"),
    }
}

pub struct PostRepository;

impl PostRepository {
    /// Public index: visible posts, newest publication first.
    pub async fn list_published(
        pool: &Pool,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<PostWithMeta>> {
        let client = pool.get().await?;
        let sql = format!(
            "{SELECT_META} WHERE {VISIBLE_WHERE} ORDER BY p.pub_date DESC LIMIT $1 OFFSET $2"
        );
        let rows = client.query(sql.as_str(), &[&limit, &offset]).await?;
        Ok(rows.iter().map(meta_from_row).collect())
    }

    pub async fn count_published(pool: &Pool) -> ApiResult<i64> {
        let client = pool.get().await?;
        let sql = format!("{COUNT_BASE} WHERE {VISIBLE_WHERE}");
        let row = client.query_one(sql.as_str(), &[]).await?;
        Ok(row.get(0))
    }

    /// Visible posts of one category.
    pub async fn list_by_category(
        pool: &Pool,
        category_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<PostWithMeta>> {
        let client = pool.get().await?;
        let sql = format!(
            "{SELECT_META} WHERE p.category_id = $1 AND {VISIBLE_WHERE} \
             ORDER BY p.pub_date DESC LIMIT $2 OFFSET $3"
        );
        let rows = client.query(sql.as_str(), &[&category_id, &limit, &offset]).await?;
        Ok(rows.iter().map(meta_from_row).collect())
    }

    pub async fn count_by_category(pool: &Pool, category_id: Uuid) -> ApiResult<i64> {
        let client = pool.get().await?;
        let sql = format!("{COUNT_BASE} WHERE p.category_id = $1 AND {VISIBLE_WHERE}");
        let row = client.query_one(sql.as_str(), &[&category_id]).await?;
        Ok(row.get(0))
    }

    /// Posts on a profile page. `include_hidden` is true only when the
    /// profile owner is the requester: they also see unpublished and
    /// scheduled posts.
    pub async fn list_by_author(
        pool: &Pool,
        author_id: Uuid,
        include_hidden: bool,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<PostWithMeta>> {
        let client = pool.get().await?;
        let filter = if include_hidden {
            String::new()
        } else {
            format!(" AND {VISIBLE_WHERE}")
        };
        let sql = format!(
            "{SELECT_META} WHERE p.author_id = $1{filter} \
             ORDER BY p.pub_date DESC LIMIT $2 OFFSET $3"
        );
        let rows = client.query(sql.as_str(), &[&author_id, &limit, &offset]).await?;
        Ok(rows.iter().map(meta_from_row).collect())
    }

    pub async fn count_by_author(
        pool: &Pool,
        author_id: Uuid,
        include_hidden: bool,
    ) -> ApiResult<i64> {
        let client = pool.get().await?;
        let filter = if include_hidden {
            String::new()
        } else {
            format!(" AND {VISIBLE_WHERE}")
        };
        let sql = format!("{COUNT_BASE} WHERE p.author_id = $1{filter}");
        let row = client.query_one(sql.as_str(), &[&author_id]).await?;
        Ok(row.get(0))
    }

    /// Fetches regardless of visibility; callers apply
    /// [`PostWithMeta::visible_to`] for the requesting viewer.
    pub async fn find_with_meta(pool: &Pool, post_id: Uuid) -> ApiResult<Option<PostWithMeta>> {
        let client = pool.get().await?;
        let sql = format!("{SELECT_META} WHERE p.id = $1");
        let row = client.query_opt(sql.as_str(), &[&post_id]).await?;
        Ok(row.as_ref().map(meta_from_row))
    }

    /// Returns the id of the inserted post.
    pub async fn insert(pool: &Pool, new_post: NewPost) -> ApiResult<Uuid> {
        let client = pool.get().await?;
        let id = Uuid::new_v4();
        client
            .execute(
                "INSERT INTO posts (id, title, text, pub_date, author_id, location_id, \
                 category_id, image_url, is_published) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
                &[
                    &id,
                    &new_post.title,
                    &new_post.text,
                    &new_post.pub_date,
                    &new_post.author_id,
                    &new_post.location_id,
                    &new_post.category_id,
                    &new_post.image_url,
                    &new_post.is_published,
                ],
            )
            .await?;
        Ok(id)
    }

    pub async fn update(pool: &Pool, post_id: Uuid, changes: PostChanges) -> ApiResult<bool> {
        let client = pool.get().await?;
        let updated = client
            .execute(
                "UPDATE posts SET title = $1, text = $2, pub_date = $3, location_id = $4, \
                 category_id = $5, image_url = $6, is_published = $7 WHERE id = $8",
                &[
                    &changes.title,
                    &changes.text,
                    &changes.pub_date,
                    &changes.location_id,
                    &changes.category_id,
                    &changes.image_url,
                    &changes.is_published,
                    &post_id,
                ],
            )
            .await?;
        Ok(updated > 0)
    }

    /// Comments go with the post (ON DELETE CASCADE).
    pub async fn delete(pool: &Pool, post_id: Uuid) -> ApiResult<bool> {
        let client = pool.get().await?;
        let deleted = client
            .execute("DELETE FROM posts WHERE id = $1", &[&post_id])
            .await?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn meta(
        author_id: Uuid,
        pub_offset: Duration,
        is_published: bool,
        category_is_published: Option<bool>,
    ) -> PostWithMeta {
        let now = Utc::now();
        PostWithMeta {
            post: Post {
                id: Uuid::new_v4(),
                title: "t".into(),
                text: "x".into(),
                pub_date: now + pub_offset,
                author_id,
                location_id: None,
                category_id: category_is_published.map(|_| Uuid::new_v4()),
                image_url: None,
                is_published,
                created_at: now,
            },
            author_username: "author".into(),
            location_name: None,
            category_title: category_is_published.map(|_| "Travel".into()),
            category_slug: category_is_published.map(|_| "travel".into()),
            category_is_published,
            comment_count: 0,
        }
    }

    #[test]
    fn published_past_post_is_public() {
        let post = meta(Uuid::new_v4(), Duration::hours(-1), true, Some(true));
        assert!(post.visible_to(None, Utc::now()));
        assert!(post.visible_to(Some(Uuid::new_v4()), Utc::now()));
    }

    #[test]
    fn scheduled_post_is_hidden_until_due() {
        let author = Uuid::new_v4();
        let post = meta(author, Duration::hours(1), true, Some(true));
        assert!(!post.visible_to(None, Utc::now()));
        assert!(!post.visible_to(Some(Uuid::new_v4()), Utc::now()));
        // but not from its author
        assert!(post.visible_to(Some(author), Utc::now()));
    }

    #[test]
    fn unpublished_post_is_author_only() {
        let author = Uuid::new_v4();
        let post = meta(author, Duration::hours(-1), false, Some(true));
        assert!(!post.visible_to(None, Utc::now()));
        assert!(post.visible_to(Some(author), Utc::now()));
    }

    #[test]
    fn unpublished_category_hides_the_post() {
        let author = Uuid::new_v4();
        let post = meta(author, Duration::hours(-1), true, Some(false));
        assert!(!post.visible_to(None, Utc::now()));
        assert!(post.visible_to(Some(author), Utc::now()));
    }

    #[test]
    fn uncategorized_post_is_not_public() {
        let author = Uuid::new_v4();
        let post = meta(author, Duration::hours(-1), true, None);
        assert!(!post.visible_to(None, Utc::now()));
        assert!(!post.visible_to(Some(Uuid::new_v4()), Utc::now()));
        assert!(post.visible_to(Some(author), Utc::now()));
    }

    #[test]
    fn boundary_pub_date_counts_as_visible() {
        let post = meta(Uuid::new_v4(), Duration::zero(), true, Some(true));
        // pub_date == now passes the `<=` comparison
        assert!(post.visible_to(None, post.post.pub_date));
    }

    #[test]
    fn sql_fragment_mirrors_predicate() {
        // Guard against the two halves of the policy drifting apart.
        assert!(VISIBLE_WHERE.contains("p.pub_date <= now()"));
        assert!(VISIBLE_WHERE.contains("p.is_published"));
        assert!(VISIBLE_WHERE.contains("COALESCE(c.is_published, FALSE)"));
    }
}
