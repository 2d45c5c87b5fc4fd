use actix_web::{HttpResponse, get, post, web};
use log::info;

use crate::AppState;
use crate::dtos::category_dtos::{CategoryIn, CategoryOut, CategoryPostsOut};
use crate::dtos::post_dtos::{PostListOut, PostOut};
use crate::dtos::{ApiResponse, PageQuery};
use crate::errors::{ApiError, ApiResult};
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::category::NewCategory;
use crate::repositories::category_repository::CategoryRepository;
use crate::repositories::post_repository::PostRepository;

#[get("/categories")]
pub async fn list_categories(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let categories = CategoryRepository::list_published(&state.pg_pool).await?;
    let categories: Vec<CategoryOut> = categories.into_iter().map(CategoryOut::from).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Categories retrieved successfully",
        categories,
    )))
}

/// Category page: 404 for unknown or unpublished slugs, otherwise the
/// category plus its visible posts.
#[get("/categories/{slug}")]
pub async fn category_posts(
    state: web::Data<AppState>,
    user: Option<AuthenticatedUser>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let slug = path.into_inner();
    let viewer = user.map(|u| u.user_id);
    let (limit, offset) = query.clamp();

    let category = CategoryRepository::find_published_by_slug(&state.pg_pool, &slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    let posts = PostRepository::list_by_category(&state.pg_pool, category.id, limit, offset).await?;
    let total = PostRepository::count_by_category(&state.pg_pool, category.id).await?;

    let posts = posts
        .into_iter()
        .map(|meta| PostOut::from_meta(meta, viewer))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Category posts retrieved successfully",
        CategoryPostsOut {
            category: CategoryOut::from(category),
            page: PostListOut {
                posts,
                limit,
                offset,
                total,
            },
        },
    )))
}

#[post("/categories")]
pub async fn create_category(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CategoryIn>,
) -> ApiResult<HttpResponse> {
    user.require_admin()?;
    let body = body.into_inner();

    let new_category = NewCategory {
        title: body.title.trim().to_string(),
        description: body.description.trim().to_string(),
        slug: body.slug.trim().to_string(),
        is_published: body.is_published.unwrap_or(true),
    };
    new_category.validate().map_err(ApiError::Validation)?;

    let category = CategoryRepository::insert(&state.pg_pool, new_category).await?;
    info!("category '{}' created", category.slug);

    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Category created successfully",
        CategoryOut::from(category),
    )))
}
