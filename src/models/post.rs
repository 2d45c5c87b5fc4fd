use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_LENGTH_TITLE: usize = 256;

/// A `posts` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    /// Scheduled publication instant; may be in the future.
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if title.len() > MAX_LENGTH_TITLE {
        return Err(format!(
            "Title must be at most {} characters",
            MAX_LENGTH_TITLE
        ));
    }
    Ok(())
}

pub fn validate_text(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("Text cannot be empty".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_limits() {
        assert!(validate_title("Morning in the old town").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("  \t ").is_err());
        assert!(validate_title(&"a".repeat(MAX_LENGTH_TITLE)).is_ok());
        assert!(validate_title(&"a".repeat(MAX_LENGTH_TITLE + 1)).is_err());
    }

    #[test]
    fn text_must_be_nonempty() {
        assert!(validate_text("words").is_ok());
        assert!(validate_text("\n\n").is_err());
    }
}
