// Weather Dashboard API v0.1
use axum::http::{HeaderName, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod errors;
mod models;
mod routes;
mod services;

use config::AppConfig;
use routes::dashboard::{AppState, SUPERSEDED_HEADER};
use services::dashboard::DashboardStore;
use services::openweather::OwmClient;

/// Weather Dashboard API OpenAPI document.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weather Dashboard API",
        version = "0.1.0",
        description = "Backend for a weather dashboard. Looks up current conditions \
            for a city or device position on OpenWeatherMap, then fetches the 3-hour \
            forecast and air-quality index for the resolved coordinates, and returns \
            display-ready cards, chart series, recommendations and map settings.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Dashboard", description = "Full dashboard search and latest result"),
        (name = "Weather", description = "Compact widget and one-call outlook"),
    ),
    paths(
        routes::health::health_check,
        routes::dashboard::get_dashboard,
        routes::dashboard::get_latest_dashboard,
        routes::weather::get_compact_weather,
        routes::weather::get_outlook,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            routes::weather::CompactResponse,
            services::presentation::DashboardView,
            services::presentation::NowCard,
            services::presentation::Highlights,
            services::presentation::ForecastCard,
            services::presentation::HourlyCard,
            services::presentation::ChartSeries,
            services::presentation::ChartPoint,
            services::presentation::AlertsPanel,
            services::presentation::AlertView,
            services::presentation::RecommendationPanel,
            services::presentation::MapView,
            services::presentation::CompactWeather,
            services::presentation::OutlookView,
            services::mapping::AqiBadge,
            services::mapping::IconAsset,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "weather_dashboard_api=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AppConfig::from_env();
    if config.owm_api_key.is_none() {
        tracing::error!("OWM_API_KEY is not set; every provider fetch will be skipped");
    }

    let client = OwmClient::new(
        &config.owm_base_url,
        config.owm_api_key.clone(),
        &config.user_agent,
    )?;

    let port = config.port;
    let state = AppState {
        client,
        store: DashboardStore::new(),
        config: Arc::new(config),
    };

    // CORS: read-only API, GET only; expose the superseded marker
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(SUPERSEDED_HEADER)]);

    let app = routes::api_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui/", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
