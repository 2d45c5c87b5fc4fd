use actix_web::{HttpResponse, get, post, web};
use log::info;

use crate::AppState;
use crate::dtos::ApiResponse;
use crate::dtos::location_dtos::{LocationIn, LocationOut};
use crate::errors::{ApiError, ApiResult};
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::location;
use crate::repositories::location_repository::LocationRepository;

#[get("/locations")]
pub async fn list_locations(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let locations = LocationRepository::list_published(&state.pg_pool).await?;
    let locations: Vec<LocationOut> = locations.into_iter().map(LocationOut::from).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Locations retrieved successfully",
        locations,
    )))
}

#[post("/locations")]
pub async fn create_location(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<LocationIn>,
) -> ApiResult<HttpResponse> {
    user.require_admin()?;
    let body = body.into_inner();

    let name = body.name.trim().to_string();
    location::validate_name(&name).map_err(ApiError::Validation)?;

    let created =
        LocationRepository::insert(&state.pg_pool, &name, body.is_published.unwrap_or(true))
            .await?;
    info!("location '{}' created", created.name);

    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Location created successfully",
        LocationOut::from(created),
    )))
}
