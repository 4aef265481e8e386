mod analysis;
mod config;
mod db;
mod errors;
mod extraction;
mod models;
mod resumes;
mod scoring;
mod state;
mod taxonomy;
mod titles;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::analysis::analyse_resume;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::errors::AppError;
use crate::extraction::upload::ResumeUpload;
use crate::models::resume::NewResume;
use crate::state::AppState;
use crate::taxonomy::import::{import_titles, load_source};
use crate::titles::repository::CurationRepository;

#[derive(Parser)]
#[command(name = "cv-matcher")]
#[command(about = "Score résumés against standardised job titles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the database schema.
    Migrate,
    /// Extract a résumé and score it against a job title.
    Analyse {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(short, long)]
        job_title: String,
        /// Store the result as a résumé record.
        #[arg(long)]
        save: bool,
    },
    /// Print a stored résumé record.
    Show { id: Uuid },
    /// Clean and upsert taxonomy titles from a JSON export.
    Import {
        #[arg(short, long)]
        file: PathBuf,
        /// Mark imported titles as approved.
        #[arg(long)]
        approve: bool,
    },
    /// List titles awaiting curation.
    Review {
        #[arg(short, long, value_enum)]
        scope: Option<ReviewScope>,
        #[arg(short, long, default_value = "50")]
        limit: i64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReviewScope {
    Approved,
    NeedsReview,
    Unverified,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries the JSON output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("cv_matcher={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting cv-matcher v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    let state = AppState::new(db, config);

    match run(cli.command, &state).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            println!("{}", serde_json::to_string_pretty(&e.to_json())?);
            std::process::exit(1);
        }
    }
}

async fn run(command: Commands, state: &AppState) -> Result<serde_json::Value, AppError> {
    match command {
        Commands::Migrate => {
            run_migrations(&state.db).await?;
            Ok(json!({ "status": "ok" }))
        }
        Commands::Analyse {
            file,
            job_title,
            save,
        } => handle_analyse(state, ResumeUpload::new(file, job_title), save).await,
        Commands::Show { id } => {
            let resume = resumes::get_resume(&state.db, id).await?;
            Ok(serde_json::to_value(resume)?)
        }
        Commands::Import { file, approve } => {
            let rows = load_source(&file)?;
            let summary = import_titles(state.titles.as_ref(), &rows, approve).await?;
            Ok(serde_json::to_value(summary)?)
        }
        Commands::Review { scope, limit } => handle_review(state, scope, limit).await,
    }
}

async fn handle_analyse(
    state: &AppState,
    upload: ResumeUpload,
    save: bool,
) -> Result<serde_json::Value, AppError> {
    let kind = upload.validate(state.config.max_upload_bytes)?;
    let text = state.extractor.extract(&upload.path, kind)?;

    let report = analyse_resume(&state.matcher, &state.content, &text, &upload.job_title).await?;

    let resume_id = if save {
        let row = resumes::save_resume(
            &state.db,
            &NewResume {
                filename: upload.filename(),
                filepath: upload.path.display().to_string(),
                job_title: upload.job_title.clone(),
                score: report.result.score,
                feedback: json!({
                    "title_alignment": report.title_alignment,
                    "content": report.feedback,
                }),
            },
        )
        .await?;
        Some(row.id)
    } else {
        None
    };

    Ok(json!({
        "resume_id": resume_id,
        "document_kind": kind,
        "result": report.result,
        "title_alignment": report.title_alignment,
        "feedback": report.feedback,
    }))
}

async fn handle_review(
    state: &AppState,
    scope: Option<ReviewScope>,
    limit: i64,
) -> Result<serde_json::Value, AppError> {
    let repo = state.titles.as_ref();
    Ok(match scope {
        Some(ReviewScope::Approved) => json!({ "approved": repo.list_approved(limit).await? }),
        Some(ReviewScope::NeedsReview) => {
            json!({ "needs_review": repo.list_needing_review(limit).await? })
        }
        Some(ReviewScope::Unverified) => {
            json!({ "unverified": repo.list_unverified(limit).await? })
        }
        None => json!({
            "needs_review": repo.list_needing_review(limit).await?,
            "unverified": repo.list_unverified(limit).await?,
        }),
    })
}
