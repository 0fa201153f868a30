use axum::http::header::{ACCEPT, ACCESS_CONTROL_ALLOW_ORIGIN, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use computer_database::config::Config;
use computer_database::db;
use computer_database::handlers::{self, AppState};
use dotenv::dotenv;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            // Try grabbing RUST_LOG from environment variable
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "computer_database=debug,tower_http=debug,axum::rejection=trace,sqlx::query=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // governor default uses PeerIPKeyExtractor - behind reverse proxy, all requests share one IP
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .finish()
            .ok_or("rate limit settings must be non-zero")?,
    );
    let governor_limiter = governor_config.limiter().clone();
    let interval = Duration::from_secs(60);
    // a separate background task to clean up
    std::thread::spawn(move || loop {
        std::thread::sleep(interval);
        tracing::info!("rate limiting storage size: {}", governor_limiter.len());
        governor_limiter.retain_recent();
    });

    let pool = db::connect(&config.database_url, config.max_connections).await?;

    if config.run_migrations {
        db::migrate(&pool).await?;
    }

    let router = handlers::router(AppState::new(pool))
        .layer(GovernorLayer {
            config: governor_config,
        })
        .layer(
            CorsLayer::new()
                .allow_origin(config.allow_origin.parse::<HeaderValue>()?)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE, ACCESS_CONTROL_ALLOW_ORIGIN]),
        )
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::debug!("Listening on {}", listener.local_addr()?);
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
