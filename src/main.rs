use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

mod db;
mod detect;
mod error;
mod models;
mod recommend;
mod report;
mod schedule;

use detect::DetectorConfig;
use error::EngineError;
use models::{
    AccessPattern, AttemptHistory, ConfusionSignals, EngagementWindow, HelpSignal, HelpSource,
    QuizOutcome, ResourceDwell, StudentStruggle,
};
use recommend::RankerConfig;
use schedule::SchedulerConfig;

#[derive(Parser)]
#[command(name = "intervention-engine")]
#[command(about = "Adaptive intervention engine for the EduMind analytics platform", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Import daily engagement snapshots from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Run one struggle detection rule against an event or activity window
    Detect {
        #[command(subcommand)]
        rule: DetectRule,
    },
    /// Generate ranked resource recommendations for a student
    Recommend {
        #[arg(long)]
        student: String,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        struggle_id: Option<i64>,
        #[arg(long, default_value_t = 5)]
        max: usize,
    },
    /// Synthesize a weekly study schedule for a student
    Schedule {
        #[arg(long)]
        student: String,
        /// Week start date (defaults to next Monday)
        #[arg(long)]
        week_start: Option<NaiveDate>,
    },
    /// Mark a struggle resolved
    Resolve {
        #[arg(long)]
        struggle_id: i64,
        #[arg(long)]
        method: String,
    },
    /// Generate a markdown intervention report for a student
    Report {
        #[arg(long)]
        student: String,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
enum DetectRule {
    /// Rule 1: quiz score below the passing thresholds
    QuizFailure {
        #[arg(long)]
        student: String,
        #[arg(long)]
        quiz: String,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        score: f64,
        #[arg(long, default_value_t = 100.0)]
        max_score: f64,
    },
    /// Rule 2: low session time or logins over a trailing window
    LowEngagement {
        #[arg(long)]
        student: String,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        session_seconds: i64,
        #[arg(long)]
        logins: i64,
        #[arg(long, default_value_t = 7)]
        days: i64,
    },
    /// Rule 3: far more time on a resource than expected
    ExcessiveTime {
        #[arg(long)]
        student: String,
        #[arg(long)]
        resource: i64,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        time_spent: i64,
        #[arg(long)]
        expected: i64,
    },
    /// Rule 4: repeated access to the same content
    RepeatedAccess {
        #[arg(long)]
        student: String,
        #[arg(long)]
        resource: i64,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        count: i64,
        #[arg(long, default_value_t = 7)]
        days: i64,
    },
    /// Rule 5: explicit help request
    HelpRequest {
        #[arg(long)]
        student: String,
        #[arg(long)]
        topic: String,
        #[arg(long, default_value = "General")]
        concept: String,
        /// One of instructor_message, forum_post, help_button
        #[arg(long)]
        source: String,
    },
    /// Rule 6: repeated failed attempts at an activity
    MultipleAttempts {
        #[arg(long)]
        student: String,
        #[arg(long)]
        activity: String,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        attempts: i64,
        #[arg(long)]
        success_rate: f64,
    },
    /// Rule 7: behavioral confusion indicators
    Confusion {
        #[arg(long)]
        student: String,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        clicks_per_minute: f64,
        #[arg(long)]
        avg_session_seconds: f64,
        #[arg(long)]
        nav_changes: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let inserted = db::import_snapshots_csv(&pool, &csv).await?;
            println!("Inserted {inserted} snapshots from {}.", csv.display());
        }
        Commands::Detect { rule } => {
            let config = DetectorConfig::default();
            let detected_at = Utc::now();

            let outcome = match rule {
                DetectRule::QuizFailure {
                    student,
                    quiz,
                    topic,
                    score,
                    max_score,
                } => detect::detect_quiz_failure(
                    &QuizOutcome {
                        student_id: student,
                        quiz_id: quiz,
                        topic,
                        score,
                        max_score,
                    },
                    &config,
                    detected_at,
                )?,
                DetectRule::LowEngagement {
                    student,
                    topic,
                    session_seconds,
                    logins,
                    days,
                } => detect::detect_low_engagement(
                    &EngagementWindow {
                        student_id: student,
                        topic,
                        days_checked: days,
                        total_session_seconds: session_seconds,
                        login_count: logins,
                    },
                    &config,
                    detected_at,
                )?,
                DetectRule::ExcessiveTime {
                    student,
                    resource,
                    topic,
                    time_spent,
                    expected,
                } => detect::detect_excessive_time(
                    &ResourceDwell {
                        student_id: student,
                        resource_id: resource,
                        topic,
                        time_spent_seconds: time_spent,
                        expected_duration_seconds: expected,
                    },
                    &config,
                    detected_at,
                )?,
                DetectRule::RepeatedAccess {
                    student,
                    resource,
                    topic,
                    count,
                    days,
                } => detect::detect_repeated_access(
                    &AccessPattern {
                        student_id: student,
                        resource_id: resource,
                        topic,
                        access_count: count,
                        days_window: days,
                    },
                    &config,
                    detected_at,
                )?,
                DetectRule::HelpRequest {
                    student,
                    topic,
                    concept,
                    source,
                } => {
                    let source = HelpSource::parse(&source).ok_or_else(|| {
                        EngineError::InvalidInput(format!("unknown help source {source}"))
                    })?;
                    Some(detect::detect_help_request(
                        &HelpSignal {
                            student_id: student,
                            topic,
                            concept,
                            source,
                        },
                        detected_at,
                    ))
                }
                DetectRule::MultipleAttempts {
                    student,
                    activity,
                    topic,
                    attempts,
                    success_rate,
                } => detect::detect_multiple_attempts(
                    &AttemptHistory {
                        student_id: student,
                        activity_id: activity,
                        topic,
                        attempt_count: attempts,
                        success_rate,
                    },
                    &config,
                    detected_at,
                )?,
                DetectRule::Confusion {
                    student,
                    topic,
                    clicks_per_minute,
                    avg_session_seconds,
                    nav_changes,
                } => detect::detect_confusion_indicators(
                    &ConfusionSignals {
                        student_id: student,
                        topic,
                        clicks_per_minute,
                        avg_session_seconds,
                        navigation_changes: nav_changes,
                    },
                    &config,
                    detected_at,
                )?,
            };

            match outcome {
                None => println!("No struggle detected."),
                Some(struggle) => {
                    let struggle_id = db::save_struggle(&pool, &struggle).await?;
                    print_struggle(struggle_id, &struggle);
                }
            }
        }
        Commands::Recommend {
            student,
            topic,
            struggle_id,
            max,
        } => {
            let profile = db::fetch_profile(&pool, &student)
                .await?
                .ok_or_else(|| EngineError::NotFound(format!("student {student}")))?;

            let struggle = match struggle_id {
                Some(id) => Some(
                    db::fetch_struggle(&pool, id)
                        .await?
                        .ok_or_else(|| EngineError::NotFound(format!("struggle {id}")))?,
                ),
                None => None,
            };

            let catalog = db::fetch_catalog(&pool).await?;
            if catalog.is_empty() {
                println!("No active resources in the catalog.");
                return Ok(());
            }

            let config = RankerConfig::default();
            let now = Utc::now();
            let recent =
                db::fetch_recent_recommendations(&pool, &student, config.recent_window_days, now)
                    .await?;

            let ranked = recommend::generate_recommendations(
                &profile,
                topic.as_deref(),
                struggle.as_ref(),
                &catalog,
                &recent,
                max,
                now,
                &config,
            );

            if ranked.is_empty() {
                println!("No new resources to recommend for this window.");
                return Ok(());
            }

            let records =
                recommend::build_recommendations(&student, &ranked, struggle_id, now, &config);
            db::save_recommendations(&pool, &records).await?;
            info!(student = %student, count = records.len(), "recommendations generated");

            println!("Top recommendations for {student}:");
            for (item, record) in ranked.iter().zip(records.iter()) {
                println!(
                    "- #{} {} ({}) score {:.3} [{}]",
                    record.rank_position,
                    item.resource.title,
                    item.resource.resource_type.as_str(),
                    record.relevance_score,
                    record.priority.as_str()
                );
                println!("  {}", record.reason);
            }
        }
        Commands::Schedule {
            student,
            week_start,
        } => {
            let config = SchedulerConfig::default();
            let history = db::fetch_engagement_history(&pool, &student, 7).await?;
            if history.is_empty() {
                return Err(EngineError::InsufficientData(format!(
                    "no engagement history for student {student}"
                ))
                .into());
            }

            let week_start = week_start
                .unwrap_or_else(|| schedule::default_week_start(Utc::now().date_naive()));
            let generated = schedule::synthesize_schedule(&history, week_start, &config)?;
            db::save_schedule(&pool, &generated).await?;
            info!(student = %student, week_start = %week_start, "schedule generated");

            println!(
                "Schedule for {student}, week of {}: {} min sessions x {}/day, avg {} min/day.",
                generated.week_start_date,
                generated.session_length_minutes,
                generated.sessions_per_day,
                generated.avg_daily_minutes
            );
            if generated.load_reduction_factor < 1.0 {
                println!(
                    "Load reduced to {:.0}% for the declining engagement trend.",
                    generated.load_reduction_factor * 100.0
                );
            }
            if generated.has_light_days {
                let light: Vec<&str> = generated
                    .daily_schedules
                    .iter()
                    .filter(|d| d.is_light_day)
                    .map(|d| d.day_name.as_str())
                    .collect();
                println!("Light days: {}.", light.join(", "));
            }
        }
        Commands::Resolve {
            struggle_id,
            method,
        } => {
            let resolved = db::resolve_struggle(&pool, struggle_id, &method, Utc::now()).await?;
            if !resolved {
                return Err(EngineError::NotFound(format!(
                    "unresolved struggle {struggle_id}"
                ))
                .into());
            }
            println!("Struggle {struggle_id} resolved via {method}.");
        }
        Commands::Report { student, out } => {
            let struggles = db::fetch_unresolved_struggles(&pool, &student, None).await?;
            let feed = db::fetch_recommendation_feed(&pool, &student, 7, Utc::now()).await?;
            let latest_schedule = db::fetch_latest_schedule(&pool, &student).await?;

            let report =
                report::build_report(&student, &struggles, &feed, latest_schedule.as_ref());
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn print_struggle(struggle_id: i64, struggle: &StudentStruggle) {
    println!(
        "Struggle {} recorded: {} / {} ({}, severity {}, confidence {:.2})",
        struggle_id,
        struggle.topic,
        struggle.concept,
        struggle.struggle_type.as_str(),
        struggle.severity.as_str(),
        struggle.confidence
    );
}
