use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::Utc;
use uuid::Uuid;

use crate::AppState;
use crate::dtos::comment_dtos::{CommentIn, CommentListOut, CommentOut};
use crate::dtos::{ApiResponse, PageQuery};
use crate::errors::{ApiError, ApiResult};
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::repositories::comment_repository::{CommentRepository, CommentWithAuthor};
use crate::repositories::post_repository::PostRepository;

/// Comments hang off the post detail page, so every route here first checks
/// that the post exists and is visible to the requester.
async fn require_visible_post(
    state: &AppState,
    post_id: Uuid,
    viewer: Option<Uuid>,
) -> ApiResult<()> {
    PostRepository::find_with_meta(&state.pg_pool, post_id)
        .await?
        .filter(|meta| meta.visible_to(viewer, Utc::now()))
        .map(|_| ())
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))
}

fn ensure_comment_author(
    row: &CommentWithAuthor,
    user: &AuthenticatedUser,
) -> Result<(), ApiError> {
    if row.comment.author_id == user.user_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Only the author can modify this comment".to_string(),
        ))
    }
}

#[get("/posts/{post_id}/comments")]
pub async fn list_comments(
    state: web::Data<AppState>,
    user: Option<AuthenticatedUser>,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let post_id = path.into_inner();
    let viewer = user.map(|u| u.user_id);
    let (limit, offset) = query.clamp();

    require_visible_post(&state, post_id, viewer).await?;

    let comments = CommentRepository::list_for_post(&state.pg_pool, post_id, limit, offset).await?;
    let total = CommentRepository::count_for_post(&state.pg_pool, post_id).await?;

    let comments = comments
        .into_iter()
        .map(|row| CommentOut::from_row(row, viewer))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Comments retrieved successfully",
        CommentListOut {
            comments,
            limit,
            offset,
            total,
        },
    )))
}

#[post("/posts/{post_id}/comments")]
pub async fn add_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<CommentIn>,
) -> ApiResult<HttpResponse> {
    let post_id = path.into_inner();
    let body = body.into_inner();
    body.validate().map_err(ApiError::Validation)?;

    require_visible_post(&state, post_id, Some(user.user_id)).await?;

    let row =
        CommentRepository::insert(&state.pg_pool, post_id, user.user_id, body.text.trim()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Comment added successfully",
        CommentOut::from_row(row, Some(user.user_id)),
    )))
}

#[put("/posts/{post_id}/comments/{comment_id}")]
pub async fn edit_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentIn>,
) -> ApiResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let body = body.into_inner();
    body.validate().map_err(ApiError::Validation)?;

    let row = CommentRepository::find_in_post(&state.pg_pool, post_id, comment_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;
    ensure_comment_author(&row, &user)?;

    CommentRepository::update_text(&state.pg_pool, comment_id, body.text.trim()).await?;

    let updated = CommentRepository::find_in_post(&state.pg_pool, post_id, comment_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Comment updated successfully",
        CommentOut::from_row(updated, Some(user.user_id)),
    )))
}

#[delete("/posts/{post_id}/comments/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
) -> ApiResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    let row = CommentRepository::find_in_post(&state.pg_pool, post_id, comment_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;
    ensure_comment_author(&row, &user)?;

    CommentRepository::delete(&state.pg_pool, comment_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Comment deleted successfully",
        (),
    )))
}
