#![allow(
    clippy::print_stdout,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown
)]

//! Cookie session server backed by SQLite.
//!
//! Run with: `cargo run --example session_server`
//!
//! Environment variables:
//!   RUST_LOG=parlor_auth=debug   (optional, default info)
//!   PARLOR_ENV=production   (optional, enables Secure cookies)
//!   DATABASE_URL=sqlite://data/parlor.db?mode=rwc   (optional)
//!   SESSION_LIFETIME_DAYS=30   (optional)
//!
//! Test endpoints:
//!   curl -i -c jar -X POST http://localhost:8080/auth/signup \
//!     -H "Content-Type: application/json" \
//!     -d '{"email": "user@example.com", "password": "securepassword"}'
//!   curl -b jar http://localhost:8080/auth/user

use std::time::Duration;

use actix_web::{App, HttpServer, web};
use parlor_auth::actions::PruneExpiredSessionsAction;
use parlor_auth::api::actix::{SessionAuth, default_session_auth_routes};
use parlor_auth::crypto::Argon2Hasher;
use parlor_auth::sqlite::{
    SqliteSessionRepository, SqliteUserRepository, connect, create_repositories,
};
use parlor_auth::{ParlorConfig, SessionManager};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ParlorConfig::from_env().expect("Invalid configuration");
    config.validate().expect("Invalid configuration");

    let pool = connect(&config.database_url)
        .await
        .expect("Failed to open database");
    let (users, sessions) = create_repositories(pool.clone());

    let manager = web::Data::new(SessionManager::new(sessions).with_config(&config.session));
    let users = web::Data::new(users);
    let session_config = web::Data::new(config.session.clone());
    let hasher = web::Data::new(Argon2Hasher::from_config(config.hashing.clone()));

    let prune = PruneExpiredSessionsAction::new(manager.get_ref().clone());
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(60 * 60));
        loop {
            interval.tick().await;
            if let Err(e) = prune.execute().await {
                log::error!(target: "parlor_auth", "msg=\"session prune failed\", error=\"{e}\"");
            }
        }
    });

    println!("Starting session server on http://localhost:8080");
    println!("Database: {}", config.database_url);
    println!("Endpoints:");
    println!("  POST   /auth/signup         - Create account and sign in");
    println!("  POST   /auth/login          - Sign in (sets session cookie)");
    println!("  POST   /auth/logout         - Sign out");
    println!("  GET    /auth/user           - Current user");
    println!("  GET    /auth/sessions       - Active sessions");
    println!("  DELETE /auth/sessions/{{id}}  - Revoke a session");

    let result = HttpServer::new(move || {
        App::new()
            .app_data(manager.clone())
            .app_data(users.clone())
            .app_data(session_config.clone())
            .app_data(hasher.clone())
            .wrap(SessionAuth::new(
                manager.clone(),
                users.clone(),
                session_config.clone(),
            ))
            .configure(default_session_auth_routes::<SqliteUserRepository, SqliteSessionRepository>)
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await;

    pool.close().await;
    result
}
