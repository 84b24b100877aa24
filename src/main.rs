use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{ArgGroup, Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use pathway_advisor::advisor::{
    advisor_router, AdvisorReport, AdvisorService, IntakeAnswers, RecommendationOutcome,
    SnapshotLoader, StudentProfile,
};
use pathway_advisor::config::AppConfig;
use pathway_advisor::error::AppError;
use pathway_advisor::telemetry;
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
    name = "Pathway Advisor",
    about = "Evaluate student profiles against the pathway eligibility rule table",
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
    /// Evaluate one profile offline and print the recommendation report
    Advise(AdviseArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Override the rule table CSV path
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Override the university directory CSV path
    #[arg(long)]
    universities: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["profile", "answers"])))]
struct AdviseArgs {
    /// Rule table CSV path (defaults to the configured path)
    #[arg(long)]
    rules: Option<PathBuf>,
    /// University directory CSV path (defaults to the configured path)
    #[arg(long)]
    universities: Option<PathBuf>,
    /// Canonical engine-input profile as a JSON file
    #[arg(long)]
    profile: Option<PathBuf>,
    /// Raw intake answers as a JSON file
    #[arg(long)]
    answers: Option<PathBuf>,
    /// Evaluation date (YYYY-MM-DD) anchoring intake-month mapping
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Emit the full JSON report instead of the text summary
    #[arg(long)]
    json: bool,
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
        Command::Advise(args) => run_advise(args),
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
    if let Some(rules) = args.rules.take() {
        config.data.rules_csv = rules;
    }
    if let Some(universities) = args.universities.take() {
        config.data.universities_csv = universities;
    }

    telemetry::init(&config.telemetry)?;

    let snapshot = Arc::new(SnapshotLoader::from_paths(
        &config.data.rules_csv,
        &config.data.universities_csv,
    )?);
    info!(
        rules = snapshot.rule_count(),
        universities = snapshot.university_count(),
        "rule snapshot loaded"
    );
    let service = Arc::new(AdvisorService::new(snapshot));

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
        .merge(advisor_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "pathway advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_advise(args: AdviseArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let rules_csv = args.rules.unwrap_or(config.data.rules_csv);
    let universities_csv = args.universities.unwrap_or(config.data.universities_csv);

    let snapshot = Arc::new(SnapshotLoader::from_paths(&rules_csv, &universities_csv)?);
    let service = AdvisorService::new(snapshot);

    let report = if let Some(path) = args.profile {
        let raw = std::fs::read_to_string(path)?;
        let profile: StudentProfile = serde_json::from_str(&raw)?;
        service.recommend(&profile)
    } else if let Some(path) = args.answers {
        let raw = std::fs::read_to_string(path)?;
        let answers: IntakeAnswers = serde_json::from_str(&raw)?;
        let today = args.today.unwrap_or_else(|| Local::now().date_naive());
        service.recommend_from_answers(&answers, today)
    } else {
        // clap's arg group enforces one of the two inputs
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "either --profile or --answers is required",
        )));
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }

    Ok(())
}

fn render_report(report: &AdvisorReport) {
    match &report.outcome {
        RecommendationOutcome::Shortlist { recommendations } => {
            println!("Recommended pathways");
            for recommendation in recommendations {
                println!(
                    "- [{}] {} (fit {:.0}%)",
                    recommendation.tier.label(),
                    recommendation.pathway_name,
                    recommendation.fit_score * 100.0
                );
                println!("  {}", recommendation.explanation.ranking_reason);
                for missing in &recommendation.explanation.missing_conditions {
                    println!("  unanswered: {missing}");
                }
            }
        }
        RecommendationOutcome::NoMatch => {
            println!("No eligible pathway found for this profile.");
        }
    }

    println!("\nReadiness: {}/100", report.readiness.composite);
    let breakdown = &report.readiness.breakdown;
    println!("- academic: {}", breakdown.academic);
    println!("- financial: {}", breakdown.financial);
    println!("- language: {}", breakdown.language);
    println!("- timeline: {}", breakdown.timeline);
    println!("- documentation: {}", breakdown.documentation);

    if report.university_matches.is_empty() {
        println!("\nUniversity options: none");
    } else {
        println!("\nUniversity options");
        for university in &report.university_matches {
            println!(
                "- {} ({}) [{}]: {}",
                university.name,
                university.country,
                university.tier.label(),
                university.match_reason
            );
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date(" 2026-08-01 ").expect("valid date"),
            NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid ymd")
        );
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("01/08/2026").is_err());
        assert!(parse_date("soon").is_err());
    }
}
