//! # commons Binary
//!
//! The entry point: loads `config.json`, opens the MySQL pool, and
//! assembles the HTTP server. Startup failures are fatal with exit
//! status 1; there is no retry path.

use actix_files::Files;
use actix_web::{web, App, HttpServer};
use cm_api::handlers::AppState;
use cm_auth_session::SessionAuthProvider;
use cm_config::Config;
use cm_db_mysql::MysqlForumRepo;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // 1. Read the config
    let config_path =
        std::env::var("COMMONS_CONFIG").unwrap_or_else(|_| "config.json".to_string());
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("unable to load configuration from {config_path}: {e}");
            std::process::exit(1);
        }
    };

    // 2. Connect to the database (pool open + single liveness ping)
    let repo = match MysqlForumRepo::connect(&config.database.dsn()).await {
        Ok(repo) => repo,
        Err(e) => {
            log::error!("unable to connect to the database: {e}");
            std::process::exit(1);
        }
    };

    // 3. Initialize the auth implementation
    let auth = SessionAuthProvider::new();

    // 4. Wrap in AppState (dynamic dispatch so plugins stay swappable)
    let state = web::Data::new(AppState {
        repo: Box::new(repo),
        auth: Box::new(auth),
    });

    log::info!("commons listening on 0.0.0.0:{}", config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(cm_api::middleware::standard_middleware())
            .app_data(state.clone())
            // Serve static assets under /assets/
            .service(Files::new("/assets", "assets"))
            .configure(cm_api::configure_routes)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
