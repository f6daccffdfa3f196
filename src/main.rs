use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use concurso_hub::auth::{auth_router, AuthStub};
use concurso_hub::config::AppConfig;
use concurso_hub::error::AppError;
use concurso_hub::listings::{
    cards::ConcursoCardView, listing_router, query, ConcursoCatalog, FacetName, FacetSelections,
    ListingQuery, ListingState,
};
use concurso_hub::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Concurso Hub",
    about = "Search and filter public-sector exam announcements from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run a one-shot listing query against the bundled catalog
    Search(SearchArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug, Default)]
struct SearchArgs {
    /// Free-text search over title, organization, and location
    #[arg(long, default_value = "")]
    term: String,
    /// Schooling level filter (repeatable): secondary, technical, higher
    #[arg(long = "level")]
    levels: Vec<String>,
    /// Sphere filter (repeatable): federal, state, municipal
    #[arg(long = "sphere")]
    spheres: Vec<String>,
    /// Area filter (repeatable), e.g. "jurídica"
    #[arg(long = "area")]
    areas: Vec<String>,
    /// Status filter (repeatable): open, upcoming, in_progress, closed
    #[arg(long = "status")]
    statuses: Vec<String>,
    /// Search radius in km (accepted for parity with the panel; not applied)
    #[arg(long)]
    radius_km: Option<u16>,
    /// How many pages of results to reveal
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Evaluation date for registration countdowns (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Search(args) => run_search(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(ConcursoCatalog::bundled()?);
    let auth = Arc::new(AuthStub::new(Duration::from_millis(
        config.listings.simulated_delay_ms,
    )));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(listing_router(ListingState::new(
            catalog.clone(),
            config.listings.page_size,
        )))
        .merge(auth_router(auth))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        concursos = catalog.len(),
        "concurso listing service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs {
        term,
        levels,
        spheres,
        areas,
        statuses,
        radius_km,
        page,
        today,
    } = args;

    let catalog = ConcursoCatalog::bundled()?;

    let mut selections = FacetSelections::new();
    selections.set(FacetName::Level, levels);
    selections.set(FacetName::Sphere, spheres);
    selections.set(FacetName::Area, areas);
    selections.set(FacetName::Status, statuses);

    let mut listing_query = ListingQuery::default()
        .with_term(term)
        .with_selections(selections.clone())
        .with_page(page);
    if let Some(radius) = radius_km {
        listing_query.radius_km = radius;
    }

    let outcome = query::run(catalog.concursos(), &listing_query);
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    render_search_results(&catalog, &selections, &outcome, today);
    Ok(())
}

fn render_search_results(
    catalog: &ConcursoCatalog,
    selections: &FacetSelections,
    outcome: &query::QueryOutcome<'_>,
    today: NaiveDate,
) {
    let chips = selections.chips(catalog);
    if chips.is_empty() {
        println!("Active filters: none");
    } else {
        let labels: Vec<&str> = chips.iter().map(|chip| chip.label.as_str()).collect();
        println!("Active filters: {}", labels.join(", "));
    }

    println!(
        "Showing {} of {} concursos ({} pages)",
        outcome.visible.len(),
        outcome.total_filtered,
        outcome.total_pages
    );

    for concurso in &outcome.visible {
        let card = ConcursoCardView::from_record(concurso, today);
        println!("\n{} — {}", card.title, card.organization);
        println!(
            "  {} | {} | {} | {} {}",
            card.status_label,
            card.sphere_label,
            card.location,
            card.openings,
            if card.openings == 1 { "vaga" } else { "vagas" }
        );
        println!(
            "  Inscrições: {} a {} | Salário: {}",
            card.registration_start, card.registration_end, card.salary
        );
        if let Some(days) = card.days_remaining {
            println!(
                "  {} {} restantes",
                days,
                if days == 1 { "dia" } else { "dias" }
            );
        }
        if let Some(exam) = card.exam_date {
            println!("  Prova: {exam}");
        }
        println!("  {}", card.detail_link);
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
