use actix_web::{HttpResponse, get, put, web};
use log::info;

use crate::AppState;
use crate::dtos::post_dtos::{PostListOut, PostOut};
use crate::dtos::profile_dtos::{ProfileOut, ProfileUpdateIn};
use crate::dtos::{ApiResponse, PageQuery};
use crate::errors::{ApiError, ApiResult};
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::repositories::post_repository::PostRepository;
use crate::repositories::user_repository::UserRepository;

/// Profile page: the user plus their posts. The owner sees everything they
/// wrote, including unpublished and scheduled posts; other viewers get the
/// public subset.
#[get("/profile/{username}")]
pub async fn get_profile(
    state: web::Data<AppState>,
    viewer: Option<AuthenticatedUser>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let username = path.into_inner();
    let viewer = viewer.map(|v| v.user_id);
    let (limit, offset) = query.clamp();

    let user = UserRepository::find_by_username(&state.pg_pool, &username)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let is_owner = viewer == Some(user.id);
    let posts =
        PostRepository::list_by_author(&state.pg_pool, user.id, is_owner, limit, offset).await?;
    let total = PostRepository::count_by_author(&state.pg_pool, user.id, is_owner).await?;

    let posts = posts
        .into_iter()
        .map(|meta| PostOut::from_meta(meta, viewer))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Profile retrieved successfully",
        ProfileOut {
            user: user.public(),
            page: PostListOut {
                posts,
                limit,
                offset,
                total,
            },
        },
    )))
}

#[put("/profile")]
pub async fn update_profile(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<ProfileUpdateIn>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    body.validate().map_err(ApiError::Validation)?;

    let updated = UserRepository::update_profile(&state.pg_pool, user.user_id, &body)
        .await?
        .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

    info!("profile updated for {}", updated.username);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Profile updated successfully",
        updated.public(),
    )))
}
