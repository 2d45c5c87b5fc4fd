use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use futures::future::{Ready, ready};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::user::ROLE_ADMIN;
use crate::services::auth_services::AuthService;

/// Extractor for handlers that require a logged-in user. Handlers that also
/// serve anonymous viewers take `Option<AuthenticatedUser>` instead.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: String,
}

impl AuthenticatedUser {
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role == ROLE_ADMIN {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "Administrator access required".to_string(),
            ))
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<AuthenticatedUser, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(Error::from))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let svc = req
        .app_data::<web::Data<AuthService>>()
        .ok_or_else(|| ApiError::Internal("auth service not configured".to_string()))?;

    let header = req
        .headers()
        .get("Authorization")
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Expected a Bearer token".to_string()))?
        .trim();

    let identity = svc.verify_token(token)?;

    Ok(AuthenticatedUser {
        user_id: identity.user_id,
        role: identity.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{ROLE_USER, User};
    use actix_web::test::TestRequest;
    use chrono::{Duration, Utc};

    fn service() -> AuthService {
        AuthService::new("extractor-secret", Duration::hours(1))
    }

    fn token_for(svc: &AuthService, user_id: Uuid) -> String {
        let user = User {
            id: user_id,
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: String::new(),
            first_name: None,
            last_name: None,
            role: ROLE_USER.into(),
            created_at: Utc::now(),
        };
        svc.issue_session(&user).unwrap().access_token
    }

    #[test]
    fn accepts_valid_bearer_token() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let token = token_for(&svc, user_id);

        let req = TestRequest::default()
            .app_data(web::Data::new(svc))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();

        let extracted = AuthenticatedUser::from_request(&req, &mut Payload::None)
            .into_inner()
            .unwrap();
        assert_eq!(extracted.user_id, user_id);
        assert_eq!(extracted.role, ROLE_USER);
    }

    #[test]
    fn rejects_missing_header() {
        let req = TestRequest::default()
            .app_data(web::Data::new(service()))
            .to_http_request();

        assert!(
            AuthenticatedUser::from_request(&req, &mut Payload::None)
                .into_inner()
                .is_err()
        );
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        let req = TestRequest::default()
            .app_data(web::Data::new(service()))
            .insert_header(("Authorization", "Basic abc"))
            .to_http_request();

        assert!(
            AuthenticatedUser::from_request(&req, &mut Payload::None)
                .into_inner()
                .is_err()
        );
    }

    #[test]
    fn rejects_tampered_token() {
        let svc = service();
        let mut token = token_for(&svc, Uuid::new_v4());
        token.push('x');

        let req = TestRequest::default()
            .app_data(web::Data::new(svc))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();

        assert!(
            AuthenticatedUser::from_request(&req, &mut Payload::None)
                .into_inner()
                .is_err()
        );
    }

    #[test]
    fn admin_gate() {
        let user = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role: ROLE_USER.into(),
        };
        assert!(user.require_admin().is_err());

        let admin = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role: ROLE_ADMIN.into(),
        };
        assert!(admin.require_admin().is_ok());
    }
}
