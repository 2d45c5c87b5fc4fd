use serde::{Deserialize, Serialize};

use crate::models::user::{self, UserPublic};

#[derive(Debug, Deserialize)]
pub struct SignupIn {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl SignupIn {
    pub fn validate(&self) -> Result<(), String> {
        user::validate_username(&self.username)?;
        user::validate_email(&self.email)?;
        user::validate_password(&self.password)?;
        if let Some(name) = &self.first_name {
            user::validate_name(name)?;
        }
        if let Some(name) = &self.last_name {
            user::validate_name(name)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginIn {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionOut {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Returned by both signup and login: the session plus who it belongs to.
#[derive(Debug, Serialize)]
pub struct AuthOut {
    pub session: SessionOut,
    pub user: UserPublic,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignupIn {
        SignupIn {
            username: "writer".into(),
            email: "writer@example.com".into(),
            password: "correct horse".into(),
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn signup_validation_covers_all_fields() {
        assert!(signup().validate().is_ok());

        let mut bad = signup();
        bad.username = "bad name".into();
        assert!(bad.validate().is_err());

        let mut bad = signup();
        bad.email = "not-an-email".into();
        assert!(bad.validate().is_err());

        let mut bad = signup();
        bad.password = "short".into();
        assert!(bad.validate().is_err());
    }
}
