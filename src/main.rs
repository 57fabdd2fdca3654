use axum::{Router, Server, http::HeaderValue, middleware::from_fn};
use diesel::{
    PgConnection,
    r2d2::{self, ConnectionManager as DbConnectionManager},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use workforce_backend::{
    AppState, config::Config, db::DbPool, error::AppError, init_tracing,
    middleware::logger::logger, routes, store::PgStore,
};

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    layer.allow_origin(allowed)
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    init_tracing(&config);

    let database = config.database();
    let manager = DbConnectionManager::<PgConnection>::new(&database.url);
    let db: DbPool = r2d2::Pool::builder()
        .max_size(database.max_connections)
        .min_idle(Some(database.min_connections))
        .connection_timeout(Duration::from_secs(database.connection_timeout))
        .build(manager)?;

    let redis = match config.cache().redis_url {
        Some(url) => match redis::Client::open(url) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "invalid REDIS_URL, running without projection mirror");
                None
            }
        },
        None => None,
    };

    let address: SocketAddr = config
        .server_address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;
    let cors = cors_layer(&config.cors_origins);

    let state = Arc::new(AppState::new(Arc::new(PgStore::new(db)), redis, &config));
    let app = Router::new()
        .merge(routes::create_router(state))
        .layer(cors)
        .layer(from_fn(logger));

    info!(%address, "server listening");
    Server::bind(&address)
        .serve(app.into_make_service())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "server exited");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
