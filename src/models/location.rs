use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_LENGTH_NAME: usize = 256;

/// A `locations` row: the optional geo tag on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Location name cannot be empty".to_string());
    }
    if name.len() > MAX_LENGTH_NAME {
        return Err(format!(
            "Location name must be at most {} characters",
            MAX_LENGTH_NAME
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_limits() {
        assert!(validate_name("Old harbor").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(&"n".repeat(MAX_LENGTH_NAME + 1)).is_err());
    }
}
