use serde::{Deserialize, Serialize};

use crate::models::user::{self, UserPublic};

use super::post_dtos::PostListOut;

/// Partial update of the requester's own account.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateIn {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ProfileUpdateIn {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(username) = &self.username {
            user::validate_username(username)?;
        }
        if let Some(email) = &self.email {
            user::validate_email(email)?;
        }
        if let Some(name) = &self.first_name {
            user::validate_name(name)?;
        }
        if let Some(name) = &self.last_name {
            user::validate_name(name)?;
        }
        if self.username.is_none()
            && self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
        {
            return Err("Nothing to update".to_string());
        }
        Ok(())
    }
}

/// Profile page: the user plus their posts. For the owner the post list is
/// unrestricted; everyone else gets the public subset.
#[derive(Debug, Serialize)]
pub struct ProfileOut {
    pub user: UserPublic,
    #[serde(flatten)]
    pub page: PostListOut,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_is_rejected() {
        let body = ProfileUpdateIn {
            username: None,
            email: None,
            first_name: None,
            last_name: None,
        };
        assert!(body.validate().is_err());
    }

    #[test]
    fn partial_update_validates_present_fields_only() {
        let body = ProfileUpdateIn {
            username: None,
            email: Some("new@example.com".into()),
            first_name: None,
            last_name: None,
        };
        assert!(body.validate().is_ok());

        let body = ProfileUpdateIn {
            username: Some("has space".into()),
            email: None,
            first_name: None,
            last_name: None,
        };
        assert!(body.validate().is_err());
    }
}
