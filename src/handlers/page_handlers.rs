use actix_web::{HttpResponse, get};
use serde::Serialize;

use crate::dtos::ApiResponse;

#[derive(Debug, Serialize)]
pub struct PageOut {
    pub title: &'static str,
    pub body: &'static str,
}

#[get("/about")]
pub async fn about() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        "Page retrieved successfully",
        PageOut {
            title: "About",
            body: "Inkwell is a small blog platform. Anyone can read published \
                   posts; registered authors publish their own, file them under \
                   categories and places, and discuss them in the comments.",
        },
    ))
}

#[get("/rules")]
pub async fn rules() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        "Page retrieved successfully",
        PageOut {
            title: "Rules",
            body: "Write under your own name, stay on topic, and keep comments \
                   civil. Posts may be scheduled for the future; until then only \
                   their author sees them. Moderators may unpublish categories \
                   wholesale.",
        },
    ))
}

/// Fallback for unmatched routes, keeping 404s in the same envelope as
/// everything else.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "status": "error",
        "message": "Resource not found",
        "data": null,
    }))
}
