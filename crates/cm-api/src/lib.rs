//! # cm-api
//!
//! The web routing and orchestration layer for commons.

pub mod error;
pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the routes for the forum.
///
/// # Developer Note
/// We use a scoped configuration to allow the main binary to mount
/// the routes under different paths if needed.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            // a non-numeric {id} segment answers 404, same as an unmatched route
            .app_data(web::PathConfig::default().error_handler(|_err, _req| {
                actix_web::error::ErrorNotFound("not found")
            }))
            // Index route
            .route("/", web::get().to(handlers::index))
            // Auth routes
            .service(
                web::resource("/act/register")
                    .route(web::post().to(handlers::register))
                    .route(web::get().to(handlers::back_to_index)),
            )
            .service(
                web::resource("/act/login")
                    .route(web::post().to(handlers::login))
                    .route(web::get().to(handlers::back_to_index)),
            )
            .route("/act/logout", web::route().to(handlers::logout))
            // Post routes
            .route("/posts/{id}", web::get().to(handlers::show_post))
            // Community routes
            .route("/communities/{id}", web::get().to(handlers::show_community))
            .route(
                "/communities/{id}/posts",
                web::post().to(handlers::create_post),
            ),
    );
}
