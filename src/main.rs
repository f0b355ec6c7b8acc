use actix_cors::Cors;
use actix_web::{http::Method, middleware::Logger, web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::{error, info, warn, LevelFilter};
use std::io;
use std::sync::Arc;

use jewel_store_api::{
    config::Config,
    database::MongoDbClient,
    routes::{configure_routes, json_config},
    services::{FileStorage, Mailer},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long, default_value = "config/config.toml")]
    config: String,
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, e);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Parse command line arguments and setup logging
    let args = Args::parse();
    let log_level = match args.log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level.to_string())).init();

    // 2. Load and check configuration
    let config = Config::load(&args.config)
        .map_err(|e| startup_error("Failed to load configuration", e))?;
    config
        .database
        .validate()
        .map_err(|e| startup_error("Invalid database configuration", e))?;
    config
        .uploads
        .validate()
        .map_err(|e| startup_error("Invalid upload configuration", e))?;

    info!("Starting jewel store API...");
    if config.server.api_key.is_none() {
        warn!("No API key configured, admin routes are open");
    }

    // 3. Shared services
    let db_client = MongoDbClient::init(&config.database)
        .await
        .map_err(|e| startup_error("Failed to initialize database", e))?;
    let db = db_client.database();

    let storage = FileStorage::new(&config.uploads);
    storage
        .ensure_dir()
        .await
        .map_err(|e| startup_error("Failed to prepare upload directory", e))?;

    let mailer = Mailer::from_config(config.mail.as_ref());
    let config = Arc::new(config);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server will be available at http://{}", bind_addr);

    HttpServer::new(move || {
        let allowed_origins = config.cors.allowed_origins.clone();
        let cors = Cors::default().allowed_origin_fn(move |origin, _req_head| {
            let Ok(origin_str) = origin.to_str() else {
                return false;
            };
            allowed_origins.iter().any(|allowed| origin_str == allowed)
        });

        let mut methods: Vec<Method> = config
            .cors
            .allowed_methods
            .iter()
            .filter_map(|m| m.parse().ok())
            .collect();
        if !methods.contains(&Method::OPTIONS) {
            methods.push(Method::OPTIONS);
        }

        let cors = cors
            .allowed_methods(methods)
            .allowed_headers(config.cors.allowed_headers.clone())
            .max_age(3600);

        let cors = if config.cors.supports_credentials {
            cors.supports_credentials()
        } else {
            cors
        };

        App::new()
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(mailer.clone()))
            .app_data(json_config(config.server.json_limit_bytes))
            .wrap(cors)
            .wrap(Logger::default())
            .configure(configure_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
