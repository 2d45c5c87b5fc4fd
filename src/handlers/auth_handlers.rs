use actix_web::{HttpResponse, post, web};
use log::info;

use crate::AppState;
use crate::dtos::ApiResponse;
use crate::dtos::auth_dtos::{AuthOut, LoginIn, SignupIn};
use crate::errors::{ApiError, ApiResult};
use crate::models::user::{NewUser, ROLE_USER};
use crate::repositories::user_repository::UserRepository;
use crate::services::auth_services::{AuthError, AuthService};

#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    auth: web::Data<AuthService>,
    body: web::Json<SignupIn>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    body.validate().map_err(ApiError::Validation)?;

    let password_hash = auth.hash_password(&body.password)?;
    let user = UserRepository::create(
        &state.pg_pool,
        NewUser {
            username: body.username.trim().to_string(),
            email: body.email.trim().to_string(),
            password_hash,
            first_name: body.first_name,
            last_name: body.last_name,
            role: ROLE_USER.to_string(),
        },
    )
    .await?;

    let session = auth.issue_session(&user)?;
    info!("new user registered: {}", user.username);

    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Account created successfully",
        AuthOut {
            session,
            user: user.public(),
        },
    )))
}

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    auth: web::Data<AuthService>,
    body: web::Json<LoginIn>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();

    // Same answer for unknown user and wrong password.
    let user = UserRepository::find_by_username(&state.pg_pool, body.username.trim())
        .await?
        .ok_or_else(|| ApiError::from(AuthError::InvalidCredentials))?;

    if !auth.verify_password(&body.password, &user.password_hash)? {
        return Err(AuthError::InvalidCredentials.into());
    }

    let session = auth.issue_session(&user)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Logged in successfully",
        AuthOut {
            session,
            user: user.public(),
        },
    )))
}
