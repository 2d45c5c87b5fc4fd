use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::AppState;
use crate::dtos::post_dtos::{PostIn, PostListOut, PostOut};
use crate::dtos::{ApiResponse, PageQuery};
use crate::errors::{ApiError, ApiResult};
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::repositories::category_repository::CategoryRepository;
use crate::repositories::location_repository::LocationRepository;
use crate::repositories::post_repository::{
    NewPost, PostChanges, PostRepository, PostWithMeta,
};

/// Author-only gate for mutations. A post the requester may not even see
/// stays a 404; a visible post someone else owns is a 403.
fn ensure_author(meta: &PostWithMeta, user: &AuthenticatedUser) -> Result<(), ApiError> {
    if meta.post.author_id == user.user_id {
        return Ok(());
    }
    if meta.visible_to(Some(user.user_id), Utc::now()) {
        Err(ApiError::Forbidden(
            "Only the author can modify this post".to_string(),
        ))
    } else {
        Err(ApiError::NotFound("Post not found".to_string()))
    }
}

/// Category and location references must point at existing rows.
async fn check_references(state: &AppState, body: &PostIn) -> ApiResult<()> {
    if let Some(category_id) = body.category_id {
        CategoryRepository::find_by_id(&state.pg_pool, category_id)
            .await?
            .ok_or_else(|| ApiError::Validation("Unknown category".to_string()))?;
    }
    if let Some(location_id) = body.location_id {
        LocationRepository::find_by_id(&state.pg_pool, location_id)
            .await?
            .ok_or_else(|| ApiError::Validation("Unknown location".to_string()))?;
    }
    Ok(())
}

#[get("/posts")]
pub async fn list_posts(
    state: web::Data<AppState>,
    user: Option<AuthenticatedUser>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let viewer = user.map(|u| u.user_id);
    let (limit, offset) = query.clamp();

    let posts = PostRepository::list_published(&state.pg_pool, limit, offset).await?;
    let total = PostRepository::count_published(&state.pg_pool).await?;

    let posts = posts
        .into_iter()
        .map(|meta| PostOut::from_meta(meta, viewer))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Posts retrieved successfully",
        PostListOut {
            posts,
            limit,
            offset,
            total,
        },
    )))
}

#[post("/posts")]
pub async fn create_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<PostIn>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    body.validate().map_err(ApiError::Validation)?;
    check_references(&state, &body).await?;

    let post_id = PostRepository::insert(
        &state.pg_pool,
        NewPost {
            title: body.title.trim().to_string(),
            text: body.text,
            // A future pub_date schedules the post.
            pub_date: body.pub_date.unwrap_or_else(Utc::now),
            author_id: user.user_id,
            location_id: body.location_id,
            category_id: body.category_id,
            image_url: body.image_url,
            // New posts are live; hiding is an edit.
            is_published: true,
        },
    )
    .await?;

    let meta = PostRepository::find_with_meta(&state.pg_pool, post_id)
        .await?
        .ok_or_else(|| ApiError::Internal("created post vanished".to_string()))?;

    info!("post {} created by {}", post_id, user.user_id);

    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Post created successfully",
        PostOut::from_meta(meta, Some(user.user_id)),
    )))
}

#[get("/posts/{post_id}")]
pub async fn get_post(
    state: web::Data<AppState>,
    user: Option<AuthenticatedUser>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let post_id = path.into_inner();
    let viewer = user.map(|u| u.user_id);

    let meta = PostRepository::find_with_meta(&state.pg_pool, post_id)
        .await?
        .filter(|meta| meta.visible_to(viewer, Utc::now()))
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Post retrieved successfully",
        PostOut::from_meta(meta, viewer),
    )))
}

#[put("/posts/{post_id}")]
pub async fn update_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<PostIn>,
) -> ApiResult<HttpResponse> {
    let post_id = path.into_inner();
    let body = body.into_inner();
    body.validate().map_err(ApiError::Validation)?;

    let meta = PostRepository::find_with_meta(&state.pg_pool, post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;
    ensure_author(&meta, &user)?;
    check_references(&state, &body).await?;

    PostRepository::update(
        &state.pg_pool,
        post_id,
        PostChanges {
            title: body.title.trim().to_string(),
            text: body.text,
            pub_date: body.pub_date.unwrap_or(meta.post.pub_date),
            location_id: body.location_id,
            category_id: body.category_id,
            image_url: body.image_url,
            is_published: body.is_published.unwrap_or(meta.post.is_published),
        },
    )
    .await?;

    let updated = PostRepository::find_with_meta(&state.pg_pool, post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Post updated successfully",
        PostOut::from_meta(updated, Some(user.user_id)),
    )))
}

#[delete("/posts/{post_id}")]
pub async fn delete_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let post_id = path.into_inner();

    let meta = PostRepository::find_with_meta(&state.pg_pool, post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;
    ensure_author(&meta, &user)?;

    PostRepository::delete(&state.pg_pool, post_id).await?;
    info!("post {} deleted by {}", post_id, user.user_id);

    Ok(HttpResponse::Ok().json(ApiResponse::success("Post deleted successfully", ())))
}
