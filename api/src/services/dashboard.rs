//! Dashboard acquisition chain.
//!
//! A search resolves current weather first; its coordinates then drive the
//! forecast and air-quality fetches (and the one-call alerts when enabled),
//! which are awaited together. Each completion is folded into an immutable
//! [`Dashboard`] through [`Dashboard::apply`]. Failures are logged and leave
//! their section unset; a search whose current-weather fetch fails produces
//! no dashboard at all.
//!
//! Completed dashboards are published into a [`DashboardStore`] that orders
//! chains by the ticket taken when they started, so a slow earlier search
//! can never replace the result of a later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{Alert, CurrentConditions, ForecastPoint};
use crate::services::location::LocationQuery;
use crate::services::mapping::{recommendations, Recommendations};
use crate::services::openweather::{AcquisitionError, OwmClient};

/// Everything the dashboard currently knows. `None` means "not fetched".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub current: Option<CurrentConditions>,
    pub forecast: Option<Vec<ForecastPoint>>,
    pub air_quality: Option<i64>,
    pub alerts: Vec<Alert>,
    pub recommendations: Option<Recommendations>,
}

/// One fetch completion.
#[derive(Debug, Clone)]
pub enum DashboardUpdate {
    Current(CurrentConditions),
    Forecast(Vec<ForecastPoint>),
    AirQuality(i64),
    Alerts(Vec<Alert>),
}

impl Dashboard {
    /// Fold a completion into a new dashboard. Each update owns exactly its
    /// own section; current weather also owns the recommendations derived
    /// from it.
    pub fn apply(self, update: DashboardUpdate) -> Self {
        match update {
            DashboardUpdate::Current(current) => Self {
                recommendations: Some(recommendations(&current.condition.category)),
                current: Some(current),
                ..self
            },
            DashboardUpdate::Forecast(points) => Self {
                forecast: Some(points),
                ..self
            },
            DashboardUpdate::AirQuality(aqi) => Self {
                air_quality: Some(aqi),
                ..self
            },
            DashboardUpdate::Alerts(alerts) => Self { alerts, ..self },
        }
    }
}

fn log_failure(section: &str, err: &AcquisitionError) {
    match err {
        AcquisitionError::MissingApiKey => {
            tracing::error!("Skipping {} fetch: {}", section, err);
        }
        _ => {
            tracing::warn!("{} fetch failed, section left empty: {}", section, err);
        }
    }
}

/// Run the full acquisition chain for one search.
///
/// Returns `None` when current weather could not be fetched; the dependent
/// requests are not issued and nothing completed. Later failures only leave
/// their own section unset.
pub async fn run_chain(
    client: &OwmClient,
    query: &LocationQuery,
    include_alerts: bool,
) -> Option<Dashboard> {
    tracing::info!("Starting dashboard chain for {:?}", query);

    let current = match client.current_weather(query).await {
        Ok(current) => current,
        Err(e) => {
            log_failure("current weather", &e);
            return None;
        }
    };

    // Device coordinates are used as given; a city search uses the place the
    // provider geocoded it to.
    let coord = match query {
        LocationQuery::Coordinates(coord) => *coord,
        LocationQuery::City(_) => current.coord,
    };
    let mut dashboard = Dashboard::default().apply(DashboardUpdate::Current(current));

    let alerts = async {
        if include_alerts {
            Some(client.outlook(coord).await)
        } else {
            None
        }
    };
    let (forecast, air_quality, outlook) =
        futures::join!(client.forecast(coord), client.air_quality(coord), alerts);

    match forecast {
        Ok(points) => dashboard = dashboard.apply(DashboardUpdate::Forecast(points)),
        Err(e) => log_failure("forecast", &e),
    }
    match air_quality {
        Ok(aqi) => dashboard = dashboard.apply(DashboardUpdate::AirQuality(aqi)),
        Err(e) => log_failure("air quality", &e),
    }
    match outlook {
        Some(Ok(outlook)) => dashboard = dashboard.apply(DashboardUpdate::Alerts(outlook.alerts)),
        Some(Err(e)) => log_failure("alerts", &e),
        None => {}
    }

    tracing::info!(
        "Dashboard chain finished: forecast={} air_quality={} alerts={}",
        dashboard.forecast.is_some(),
        dashboard.air_quality.is_some(),
        dashboard.alerts.len()
    );
    Some(dashboard)
}

#[derive(Debug, Default)]
struct Published {
    /// 0 until the first publication
    ticket: u64,
    dashboard: Dashboard,
}

/// The most recently started chain's dashboard, shared across requests.
#[derive(Debug, Clone, Default)]
pub struct DashboardStore {
    next_ticket: Arc<AtomicU64>,
    latest: Arc<RwLock<Published>>,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a ticket when a chain starts. Tickets start at 1 and increase.
    pub fn begin(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publish a finished chain. Returns `false` (and keeps the current
    /// dashboard) when a chain with a later ticket has already published.
    pub async fn publish(&self, ticket: u64, dashboard: Dashboard) -> bool {
        let mut slot = self.latest.write().await;
        if ticket < slot.ticket {
            tracing::debug!(
                "Discarding dashboard from ticket {}, ticket {} already published",
                ticket,
                slot.ticket
            );
            return false;
        }
        slot.ticket = ticket;
        slot.dashboard = dashboard;
        true
    }

    pub async fn latest(&self) -> Dashboard {
        self.latest.read().await.dashboard.clone()
    }
}
