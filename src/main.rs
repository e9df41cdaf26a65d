//! `senda` command line.
//!
//! - `senda questions` prints the question bank as JSON.
//! - `senda assess --answers answers.json` scores an answer file and prints
//!   the assessment outcome as JSON.
//! - `senda notebook [--path <id>]` prints saved notebook entries as JSON.
//!
//! Configuration comes from `SENDA__*` environment variables (and `.env`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use senda::adapters::ai::{AnthropicConfig, AnthropicProvider, OpenAIConfig, OpenAIProvider};
use senda::adapters::interpreter::{LlmProfileInterpreter, RankingInterpreter};
use senda::adapters::question_source::{
    HttpQuestionSource, HttpQuestionSourceConfig, InMemoryQuestionSource,
};
use senda::adapters::storage::FileExerciseStore;
use senda::adapters::validation::JsonSchemaValidator;
use senda::application::{
    AssessmentError, CompleteAssessmentCommand, CompleteAssessmentHandler, LoadQuestionnaireHandler,
};
use senda::config::{
    AiConfig, AiProvider, AppConfig, ConfigError, InterpretationMode, QuestionSourceConfig,
    QuestionSourceKind,
};
use senda::domain::assessment::{AnswerSheet, ScoringEngine};
use senda::domain::catalog::{Catalog, CatalogError};
use senda::domain::foundation::{PathId, ValidationError};
use senda::ports::{
    AIError, AIProvider, NotebookRepository, ProfileInterpreter, QuestionSource,
    QuestionSourceError, RepositoryError,
};
use secrecy::ExposeSecret;

#[derive(Debug, Parser)]
#[command(name = "senda", version, about = "Self-help assessment scoring and path recommendation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch the question bank and print it as JSON
    Questions,
    /// Score an answer file and print the outcome as JSON
    Assess {
        /// JSON object mapping item ids to answers (1-5)
        #[arg(long)]
        answers: PathBuf,
    },
    /// Print notebook entries stored under the data directory
    Notebook {
        /// Only entries produced within this path
        #[arg(long)]
        path: Option<String>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    QuestionSource(#[from] QuestionSourceError),

    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error("AI provider setup failed: {0}")]
    Provider(#[from] AIError),

    #[error("Invalid input: {0}")]
    Input(#[from] ValidationError),

    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema setup failed: {0}")]
    Schemas(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    senda::telemetry::init(&config.telemetry);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<(), CliError> {
    config.validate().map_err(ConfigError::from)?;

    match cli.command {
        Command::Questions => {
            let source = question_source(&config.question_source)?;
            let questionnaire = LoadQuestionnaireHandler::new(source).handle().await?;
            println!("{}", serde_json::to_string_pretty(&questionnaire.dimensions)?);
        }
        Command::Assess { answers } => {
            let raw = std::fs::read_to_string(&answers).map_err(|source| CliError::Read {
                path: answers.clone(),
                source,
            })?;
            let raw: std::collections::BTreeMap<String, i64> = serde_json::from_str(&raw)?;
            let answers = AnswerSheet::from_raw(raw)?;

            let source = question_source(&config.question_source)?;
            let bank = source.fetch_dimensions().await?;
            let handler = CompleteAssessmentHandler::new(
                ScoringEngine::new(config.scoring.rules()),
                interpreter(&config)?,
                Arc::new(Catalog::builtin()?),
            )
            .with_completeness(config.interpretation.completeness);
            let outcome = handler
                .handle(CompleteAssessmentCommand { bank, answers })
                .await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Notebook { path } => {
            let store = FileExerciseStore::new(&config.storage.data_dir);
            let entries = match path {
                Some(path) => store.list_for_path(&PathId::new(path)?).await?,
                None => store.list().await?,
            };
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

fn question_source(config: &QuestionSourceConfig) -> Result<Arc<dyn QuestionSource>, CliError> {
    match config.kind {
        QuestionSourceKind::Sample => Ok(Arc::new(InMemoryQuestionSource::sample()?)),
        QuestionSourceKind::Http => {
            // validate() guarantees both are present
            let base_url = config.base_url.clone().unwrap_or_default();
            let secret = config
                .secret
                .as_ref()
                .map(|s| s.expose_secret().clone())
                .unwrap_or_default();
            let http = HttpQuestionSourceConfig::new(base_url, secret)
                .with_resource_path(config.resource_path.clone())
                .with_timeout(config.timeout());
            Ok(Arc::new(HttpQuestionSource::new(http)?))
        }
    }
}

fn interpreter(config: &AppConfig) -> Result<Arc<dyn ProfileInterpreter>, CliError> {
    match config.interpretation.mode {
        InterpretationMode::Ranking => Ok(Arc::new(RankingInterpreter::new())),
        InterpretationMode::Llm => {
            let validator =
                JsonSchemaValidator::new().map_err(|e| CliError::Schemas(e.to_string()))?;
            let interpretation = &config.interpretation;
            Ok(Arc::new(
                LlmProfileInterpreter::new(ai_provider(&config.ai)?, Arc::new(validator))
                    .with_completeness(interpretation.completeness)
                    .with_temperature(interpretation.temperature)
                    .with_max_tokens(interpretation.max_tokens),
            ))
        }
    }
}

fn ai_provider(config: &AiConfig) -> Result<Arc<dyn AIProvider>, CliError> {
    match config.provider {
        AiProvider::Anthropic => {
            let mut provider =
                AnthropicConfig::new(config.anthropic_api_key.clone().unwrap_or_default())
                    .with_timeout(config.timeout())
                    .with_max_retries(config.max_retries);
            if let Some(model) = &config.model {
                provider = provider.with_model(model.clone());
            }
            if let Some(url) = &config.base_url {
                provider = provider.with_base_url(url.clone());
            }
            Ok(Arc::new(AnthropicProvider::new(provider)?))
        }
        AiProvider::OpenAI => {
            let mut provider =
                OpenAIConfig::new(config.openai_api_key.clone().unwrap_or_default())
                    .with_timeout(config.timeout())
                    .with_max_retries(config.max_retries);
            if let Some(model) = &config.model {
                provider = provider.with_model(model.clone());
            }
            if let Some(url) = &config.base_url {
                provider = provider.with_base_url(url.clone());
            }
            Ok(Arc::new(OpenAIProvider::new(provider)?))
        }
    }
}
