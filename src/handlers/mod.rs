pub mod auth_handlers;
pub mod category_handlers;
pub mod comment_handlers;
pub mod location_handlers;
pub mod page_handlers;
pub mod post_handlers;
pub mod profile_handlers;
