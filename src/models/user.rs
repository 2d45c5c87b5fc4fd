use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_LENGTH_USERNAME: usize = 150;
pub const MAX_LENGTH_NAME: usize = 150;
pub const MIN_LENGTH_PASSWORD: usize = 8;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

fn username_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\w.@+-]+$").expect("static pattern"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static pattern"))
}

/// A `users` row. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `users`. Role is set server-side.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
}

/// The redacted shape sent to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: Uuid,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Claims carried in the session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// subject / user id
    pub sub: String,
    pub role: String,
    pub exp: u64,
    pub iat: u64,
}

impl User {
    pub fn public(&self) -> UserPublic {
        UserPublic {
            id: self.id,
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

}

pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.len() > MAX_LENGTH_USERNAME {
        return Err(format!(
            "Username must be at most {} characters",
            MAX_LENGTH_USERNAME
        ));
    }
    if !username_re().is_match(username) {
        return Err(
            "Username may only contain letters, digits and @/./+/-/_ characters".to_string(),
        );
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if !email_re().is_match(email) {
        return Err("Invalid email address".to_string());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < MIN_LENGTH_PASSWORD {
        return Err(format!(
            "Password must be at least {} characters long",
            MIN_LENGTH_PASSWORD
        ));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), String> {
    if name.len() > MAX_LENGTH_NAME {
        return Err(format!(
            "Name must be at most {} characters",
            MAX_LENGTH_NAME
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_usernames() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("mr.pub_42").is_ok());
        assert!(validate_username("name@host").is_ok());
    }

    #[test]
    fn rejects_bad_usernames() {
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"x".repeat(MAX_LENGTH_USERNAME + 1)).is_err());
    }

    #[test]
    fn email_needs_local_and_domain() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("nope").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a b@c.de").is_err());
    }

    #[test]
    fn password_minimum_length() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn public_shape_drops_credentials() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: "$argon2id$...".into(),
            first_name: Some("Alice".into()),
            last_name: None,
            role: ROLE_USER.into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(user.public()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("email").is_none());
        assert_eq!(json["username"], "alice");
    }
}
