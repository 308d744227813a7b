//! Order tracker HTTP service.

use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use order_tracker::adapters::http::{order_router, OrderAppState};
use order_tracker::adapters::memory::{
    InMemoryAdminActivity, InMemoryCustomerStatistics, InMemoryOrderRepository,
};
use order_tracker::adapters::postgres::{
    PostgresAdminActivity, PostgresCustomerStatistics, PostgresOrderRepository,
};
use order_tracker::config::{AppConfig, DatabaseConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let state = match &config.database {
        Some(database) => postgres_state(database, &config).await?,
        None => {
            tracing::warn!("No database configured, orders are kept in memory");
            memory_state(&config)
        }
    }
    .with_verbose_errors(config.features.verbose_errors);

    let mut app = order_router()
        .with_state(state)
        .layer(cors_layer(&config.server))
        .layer(TimeoutLayer::new(config.server.request_timeout()));
    if config.features.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Order tracker listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Order tracker stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn postgres_state(
    database: &DatabaseConfig,
    config: &AppConfig,
) -> Result<OrderAppState, Box<dyn std::error::Error>> {
    let pool = database.pool_options().connect(&database.url).await?;
    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(OrderAppState::new(
        Arc::new(PostgresOrderRepository::new(pool.clone())),
        Arc::new(PostgresCustomerStatistics::new(pool.clone())),
        Arc::new(PostgresAdminActivity::new(pool)),
        config.lifecycle.max_order_id_attempts,
    ))
}

fn memory_state(config: &AppConfig) -> OrderAppState {
    let orders = InMemoryOrderRepository::new();
    OrderAppState::new(
        Arc::new(orders.clone()),
        Arc::new(InMemoryCustomerStatistics::new(orders)),
        Arc::new(InMemoryAdminActivity::new()),
        config.lifecycle.max_order_id_attempts,
    )
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server runs until killed.
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
