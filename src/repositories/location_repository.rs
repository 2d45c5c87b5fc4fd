use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::errors::ApiResult;
use crate::models::location::Location;

const SELECT_LOCATION: &str = "SELECT id, name, is_published, created_at FROM locations";

fn location_from_row(row: &Row) -> Location {
    Location {
        id: row.get("id"),
        name: row.get("name"),
        is_published: row.get("is_published"),
        created_at: row.get("created_at"),
    }
}

pub struct LocationRepository;

impl LocationRepository {
    pub async fn list_published(pool: &Pool) -> ApiResult<Vec<Location>> {
        let client = pool.get().await?;
        let sql = format!("{SELECT_LOCATION} WHERE is_published ORDER BY name ASC");
        let rows = client.query(sql.as_str(), &[]).await?;
        Ok(rows.iter().map(location_from_row).collect())
    }

    /// Unfiltered lookup, used when attaching a location to a post.
    pub async fn find_by_id(pool: &Pool, location_id: Uuid) -> ApiResult<Option<Location>> {
        let client = pool.get().await?;
        let sql = format!("{SELECT_LOCATION} WHERE id = $1");
        let row = client.query_opt(sql.as_str(), &[&location_id]).await?;
        Ok(row.as_ref().map(location_from_row))
    }

    pub async fn insert(pool: &Pool, name: &str, is_published: bool) -> ApiResult<Location> {
        let client = pool.get().await?;
        let id = Uuid::new_v4();
        let row = client
            .query_one(
                "INSERT INTO locations (id, name, is_published) VALUES ($1, $2, $3) \
                 RETURNING id, name, is_published, created_at",
                &[&id, &name, &is_published],
            )
            .await?;
        Ok(location_from_row(&row))
    }
}
