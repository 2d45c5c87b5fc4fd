mod config;
mod dtos;
mod errors;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod services;

use std::env;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use deadpool_postgres::Pool;
use log::{error, info};

use crate::handlers::auth_handlers::{login, signup};
use crate::handlers::category_handlers::{category_posts, create_category, list_categories};
use crate::handlers::comment_handlers::{
    add_comment, delete_comment, edit_comment, list_comments,
};
use crate::handlers::location_handlers::{create_location, list_locations};
use crate::handlers::page_handlers::{about, not_found, rules};
use crate::handlers::post_handlers::{
    create_post, delete_post, get_post, list_posts, update_post,
};
use crate::handlers::profile_handlers::{get_profile, update_profile};
use crate::services::auth_services::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub pg_pool: Pool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let pg_pool = match config::get_pg_pool() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to create PG pool: {}", e);
            std::process::exit(1);
        }
    };

    let auth_service = AuthService::new_from_env();
    let auth_data = web::Data::new(auth_service);

    let state = web::Data::new(AppState { pg_pool });

    let allowed_origins = env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".into());

    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                "authorization",
                "content-type",
                "accept",
                "x-requested-with",
            ])
            .supports_credentials()
            .max_age(3600);

        for origin in allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(auth_data.clone())
            .service(
                web::scope("/auth")
                    .service(signup) // POST /auth/signup
                    .service(login), // POST /auth/login
            )
            .service(
                web::scope("/api")
                    .service(list_posts) //      GET    /api/posts
                    .service(create_post) //     POST   /api/posts
                    .service(get_post) //        GET    /api/posts/{id}
                    .service(update_post) //     PUT    /api/posts/{id}
                    .service(delete_post) //     DELETE /api/posts/{id}
                    .service(list_comments) //   GET    /api/posts/{id}/comments
                    .service(add_comment) //     POST   /api/posts/{id}/comments
                    .service(edit_comment) //    PUT    /api/posts/{id}/comments/{cid}
                    .service(delete_comment) //  DELETE /api/posts/{id}/comments/{cid}
                    .service(list_categories) // GET    /api/categories
                    .service(create_category) // POST   /api/categories
                    .service(category_posts) //  GET    /api/categories/{slug}
                    .service(list_locations) //  GET    /api/locations
                    .service(create_location) // POST   /api/locations
                    .service(get_profile) //     GET    /api/profile/{username}
                    .service(update_profile), // PUT    /api/profile
            )
            .service(
                web::scope("/pages")
                    .service(about) // GET /pages/about
                    .service(rules), // GET /pages/rules
            )
            .default_service(web::route().to(not_found))
    })
    .bind(&bind_address)?
    .run()
    .await
}
