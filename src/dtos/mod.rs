pub mod auth_dtos;
pub mod category_dtos;
pub mod comment_dtos;
pub mod location_dtos;
pub mod post_dtos;
pub mod profile_dtos;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: i64 = 10;
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Envelope every endpoint answers with.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            status: "success".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }
}

/// limit/offset query pair used by every list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageQuery {
    /// Clamps to sane bounds: limit in 1..=100 (default 10), offset >= 0.
    pub fn clamp(&self) -> (i64, i64) {
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults() {
        let (limit, offset) = PageQuery::default().clamp();
        assert_eq!(limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(offset, 0);
    }

    #[test]
    fn page_clamping() {
        let q = PageQuery {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(q.clamp(), (MAX_PAGE_LIMIT, 0));

        let q = PageQuery {
            limit: Some(0),
            offset: Some(30),
        };
        assert_eq!(q.clamp(), (1, 30));
    }
}
