//! CLI entrypoint for Symptom Triage
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use triage_application::{
    ConversationOrchestrator, KnowledgeSourcePort, LoadKnowledgeUseCase, TriageConfig,
    TriagePipeline,
};
use triage_domain::{
    Clock, DiseaseKnowledge, PartialPhraseHeuristic, PredictionEngine, SessionStore, SystemClock,
};
use triage_infrastructure::{
    BuiltinKnowledgeSource, CleanupScheduler, ConfigLoader, FileClassifierKind, FileConfig,
    FileKnowledgeSource, InMemorySessionStore, NaiveBayesClassifier,
};
use triage_presentation::{ChatRepl, Cli, Command, ConsoleFormatter, ReplConfig, RequestServer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting Symptom Triage");

    // === Configuration ===
    let file_config = load_config(&cli)?;
    let config = file_config
        .to_triage_config()
        .context("Invalid configuration")?;

    if cli.no_color || !file_config.repl.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let knowledge = load_knowledge(&file_config).await?;
    let engine = build_engine(knowledge, &file_config, &config);
    let pipeline = Arc::new(TriagePipeline::new(engine));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store: Arc<dyn SessionStore> =
        Arc::new(InMemorySessionStore::new(clock.clone(), config.session_ttl));
    let cleanup = CleanupScheduler::new(
        store.clone(),
        clock.clone(),
        config.cleanup_interval,
        config.session_ttl,
    )
    .start();

    let orchestrator = ConversationOrchestrator::new(store, pipeline, clock, config);

    let outcome = run_command(&cli, &file_config, orchestrator).await;

    cleanup.stop().await;
    info!("Symptom Triage stopped");

    outcome
}

async fn run_command(
    cli: &Cli,
    file_config: &FileConfig,
    orchestrator: ConversationOrchestrator,
) -> Result<()> {
    match cli.command() {
        Command::Chat => {
            let repl_config = ReplConfig {
                show_symptoms: file_config.repl.show_symptoms,
                color: file_config.repl.color && !cli.no_color,
                history_file: file_config.repl.history_file.as_ref().map(Into::into),
            };
            let mut repl = ChatRepl::new(orchestrator).with_config(repl_config);
            repl.run().await?;
        }
        Command::Predict { symptoms, json } => {
            let output = orchestrator.predict_standalone(&symptoms)?;
            if json {
                println!("{}", ConsoleFormatter::format_predict_json(&output));
            } else {
                println!("{}", ConsoleFormatter::format_predict(&output));
            }
        }
        Command::Serve => {
            let server = RequestServer::new(orchestrator);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let handled = server.serve(stdin, tokio::io::stdout()).await?;
            info!("Served {} requests", handled);
        }
    }
    Ok(())
}

/// Initialize tracing based on verbosity level, honoring `RUST_LOG` when set.
///
/// Logs go to stderr, or to `--log-file` through a non-blocking writer whose
/// guard must live until exit.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let Some(log_file) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = log_file
        .file_name()
        .context("--log-file must name a file")?;
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }

    if let Some(path) = &cli.config
        && !path.exists()
    {
        bail!("Config file not found: {}", path.display());
    }

    ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!("{}", e))
}

async fn load_knowledge(file_config: &FileConfig) -> Result<Arc<DiseaseKnowledge>> {
    let source: Arc<dyn KnowledgeSourcePort> = match &file_config.knowledge.path {
        Some(path) => Arc::new(FileKnowledgeSource::new(path)),
        None => Arc::new(BuiltinKnowledgeSource),
    };
    let origin = source.describe();

    LoadKnowledgeUseCase::new(source)
        .execute()
        .await
        .with_context(|| format!("Failed to load knowledge base from {}", origin))
}

fn build_engine(
    knowledge: Arc<DiseaseKnowledge>,
    file_config: &FileConfig,
    config: &TriageConfig,
) -> PredictionEngine {
    let mut engine = PredictionEngine::new(knowledge.clone())
        .with_top_k(config.top_k)
        .with_prevalence_blend(config.prevalence_blend);

    if file_config.prediction.enable_heuristic {
        engine = engine.with_secondary(Arc::new(PartialPhraseHeuristic::new(
            config.prevalence_blend,
        )));
    }

    match file_config.prediction.classifier {
        FileClassifierKind::NaiveBayes => {
            if knowledge.is_empty() {
                warn!("Naive Bayes classifier skipped: knowledge base is empty");
            } else {
                engine = engine.with_secondary(Arc::new(NaiveBayesClassifier::fit(&knowledge)));
            }
        }
        FileClassifierKind::None => {}
    }

    engine
}
