//! HTTP handlers and route configuration.

mod auth;
mod calendar;
mod grades;
mod health;
mod notes;
mod schedule;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/refresh", web::post().to(auth::refresh))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/me", web::get().to(auth::me)),
            )
            // Account management
            .service(
                web::scope("/users")
                    .route("/password", web::put().to(users::change_password))
                    .route("", web::delete().to(users::delete_account)),
            )
            // Owner-scoped records
            .service(
                web::scope("/grades")
                    .route("", web::get().to(grades::list))
                    .route("", web::post().to(grades::create))
                    .route("/{id}", web::get().to(grades::get))
                    .route("/{id}", web::put().to(grades::update))
                    .route("/{id}", web::delete().to(grades::remove)),
            )
            .service(
                web::scope("/schedule")
                    .route("", web::get().to(schedule::list))
                    .route("", web::post().to(schedule::create))
                    .route("/{id}", web::get().to(schedule::get))
                    .route("/{id}", web::put().to(schedule::update))
                    .route("/{id}", web::delete().to(schedule::remove)),
            )
            .service(
                web::scope("/calendar")
                    .route("", web::get().to(calendar::list))
                    .route("", web::post().to(calendar::create))
                    .route("/{id}", web::get().to(calendar::get))
                    .route("/{id}", web::put().to(calendar::update))
                    .route("/{id}", web::delete().to(calendar::remove)),
            )
            .service(
                web::scope("/notes")
                    .route("", web::get().to(notes::list))
                    .route("", web::post().to(notes::create))
                    .route("/{id}", web::get().to(notes::get))
                    .route("/{id}", web::put().to(notes::update))
                    .route("/{id}", web::delete().to(notes::remove)),
            ),
    );
}
