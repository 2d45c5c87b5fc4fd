use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::location::Location;

#[derive(Debug, Deserialize)]
pub struct LocationIn {
    pub name: String,
    pub is_published: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct LocationOut {
    pub id: Uuid,
    pub name: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Location> for LocationOut {
    fn from(loc: Location) -> Self {
        LocationOut {
            id: loc.id,
            name: loc.name,
            is_published: loc.is_published,
            created_at: loc.created_at,
        }
    }
}
