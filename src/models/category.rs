use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_LENGTH_TITLE: usize = 256;
pub const MAX_LENGTH_SLUG: usize = 64;

fn slug_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static pattern"))
}

/// A `categories` row. Unpublished categories hide every post filed under
/// them from non-authors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// URL identifier; latin letters, digits, hyphen and underscore.
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title cannot be empty".to_string());
        }
        if self.title.len() > MAX_LENGTH_TITLE {
            return Err(format!(
                "Title must be at most {} characters",
                MAX_LENGTH_TITLE
            ));
        }
        if self.description.trim().is_empty() {
            return Err("Description cannot be empty".to_string());
        }
        validate_slug(&self.slug)
    }
}

pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug.is_empty() {
        return Err("Slug cannot be empty".to_string());
    }
    if slug.len() > MAX_LENGTH_SLUG {
        return Err(format!("Slug must be at most {} characters", MAX_LENGTH_SLUG));
    }
    if !slug_re().is_match(slug) {
        return Err(
            "Slug may only contain latin letters, digits, hyphen and underscore".to_string(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_charset() {
        assert!(validate_slug("travel").is_ok());
        assert!(validate_slug("city-life_2024").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("with space").is_err());
        assert!(validate_slug("кириллица").is_err());
        assert!(validate_slug("semi;colon").is_err());
        assert!(validate_slug(&"s".repeat(MAX_LENGTH_SLUG + 1)).is_err());
    }

    #[test]
    fn new_category_checks_all_fields() {
        let cat = NewCategory {
            title: "Travel".into(),
            description: "Places and roads".into(),
            slug: "travel".into(),
            is_published: true,
        };
        assert!(cat.validate().is_ok());

        let mut bad = cat.clone();
        bad.description = " ".into();
        assert!(bad.validate().is_err());

        let mut bad = cat;
        bad.slug = "no slash/".into();
        assert!(bad.validate().is_err());
    }
}
