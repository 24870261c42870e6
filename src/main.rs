use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use poolcoach::config::AppConfig;
use poolcoach::error::AppError;
use poolcoach::telemetry;
use poolcoach::workflows::scoring::{
    catalog, eligibility::eligible_from_roster, roster_from_csv_path, scoring_router,
    CohortScoringService, ConfiguredAdvisory, DimensionScore, DisabledAdvisory,
    HttpAdvisoryClient, InMemoryScoreRepository, OpenCohortDirectory, PayBandSchedule,
    ProgramCategory, ScoreCalculator, StaticRoster,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Cohort Coaching Engine",
    about = "Score training cohort complexity and match qualified coaches",
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
    /// Derive totals, grade requirements, and pay bands without saving
    Score {
        #[command(subcommand)]
        command: ScoreCommand,
    },
    /// Inspect coach qualification against a roster export
    Coaches {
        #[command(subcommand)]
        command: CoachCommand,
    },
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

#[derive(Subcommand, Debug)]
enum ScoreCommand {
    /// Show what a score sheet would commit as
    Preview(SheetArgs),
}

#[derive(Subcommand, Debug)]
enum CoachCommand {
    /// List roster coaches qualified for a score sheet's requirement
    Eligible(EligibleArgs),
}

#[derive(Args, Debug)]
struct SheetArgs {
    /// Program category (e.g. learn_to_swim, competitive_elite)
    #[arg(long, value_parser = parse_category)]
    category: ProgramCategory,
    /// Seven dimension scores in catalog order, e.g. --scores 3,2,4,3,3,5,1
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    scores: Vec<u8>,
}

#[derive(Args, Debug)]
struct EligibleArgs {
    #[command(flatten)]
    sheet: SheetArgs,
    /// Member roster CSV export to qualify against
    #[arg(long)]
    roster_csv: PathBuf,
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
        Command::Score {
            command: ScoreCommand::Preview(args),
        } => run_score_preview(args),
        Command::Coaches {
            command: CoachCommand::Eligible(args),
        } => run_eligible_listing(args),
    }
}

/// Load the pay band policy, preferring an operator-supplied file. Any gap
/// in the 21 pairings aborts startup here, before traffic is accepted.
fn load_schedule(config: &AppConfig) -> Result<PayBandSchedule, AppError> {
    match &config.scoring.pay_band_file {
        Some(path) => Ok(PayBandSchedule::from_json_path(path)?),
        None => Ok(PayBandSchedule::standard()),
    }
}

fn parse_category(raw: &str) -> Result<ProgramCategory, String> {
    raw.parse::<ProgramCategory>().map_err(|err| err.to_string())
}

fn sheet_scores(args: &SheetArgs) -> Vec<DimensionScore> {
    args.scores
        .iter()
        .enumerate()
        .map(|(position, &score)| DimensionScore {
            index: position as u8 + 1,
            score,
            rationale: None,
        })
        .collect()
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

    let schedule = load_schedule(&config)?;

    let roster = match &config.scoring.roster_csv {
        Some(path) => StaticRoster::new(roster_from_csv_path(path)?),
        None => StaticRoster::default(),
    };

    let advisory = match &config.scoring.advisory {
        Some(settings) => ConfiguredAdvisory::Http(HttpAdvisoryClient::new(
            settings.base_url.clone(),
            settings.timeout,
        )?),
        None => ConfiguredAdvisory::Disabled(DisabledAdvisory),
    };

    let service = Arc::new(CohortScoringService::new(
        Arc::new(InMemoryScoreRepository::default()),
        Arc::new(OpenCohortDirectory),
        Arc::new(roster),
        Arc::new(advisory),
        ScoreCalculator::new(schedule),
    ));

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
        .merge(scoring_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "cohort coaching engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_score_preview(args: SheetArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let schedule = load_schedule(&config)?;
    let calculator = ScoreCalculator::new(schedule);

    let category = args.category;
    let scores = sheet_scores(&args);
    let labels = catalog::dimension_labels(category);

    match calculator.compute(category, &scores) {
        Ok(derived) => {
            println!("Score preview for {}", category.label());
            for entry in &scores {
                let label = labels[(entry.index - 1) as usize];
                println!("- {label}: {}", entry.score);
            }
            println!("\nTotal score: {}", derived.total_score);
            println!("Required coach grade: {}", derived.required_grade.label());
            println!(
                "Pay band: {:.1}% - {:.1}% of revenue",
                derived.pay_band.min_percent, derived.pay_band.max_percent
            );
            Ok(())
        }
        Err(invalid) => {
            eprintln!("{invalid}");
            std::process::exit(2);
        }
    }
}

fn run_eligible_listing(args: EligibleArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let schedule = load_schedule(&config)?;
    let calculator = ScoreCalculator::new(schedule);

    let category = args.sheet.category;
    let scores = sheet_scores(&args.sheet);
    let derived = match calculator.compute(category, &scores) {
        Ok(derived) => derived,
        Err(invalid) => {
            eprintln!("{invalid}");
            std::process::exit(2);
        }
    };

    let roster = roster_from_csv_path(&args.roster_csv)?;
    let roster_size = roster.len();
    let eligible = eligible_from_roster(roster, derived.required_grade);

    println!(
        "Requirement: {} (total score {})",
        derived.required_grade.label(),
        derived.total_score
    );

    if eligible.is_empty() {
        println!("Eligible coaches: none of {roster_size} on the roster qualify");
        return Ok(());
    }

    println!("Eligible coaches ({} of {roster_size}):", eligible.len());
    for coach in &eligible {
        println!(
            "- {} <{}> | {} | {}h coached, {:.1} avg rating",
            coach.name,
            coach.email,
            coach.grade.label(),
            coach.stats.coaching_hours,
            coach.stats.avg_rating
        );
    }

    Ok(())
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
