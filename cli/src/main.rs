//! CLI entrypoint for LLM Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use council_application::{
    CheckHealthUseCase, ConversationLogger, ExecutionParams, HealthProbe, RunCouncilUseCase,
};
use council_domain::{OutputFormat, Question};
use council_infrastructure::{ConfigLoader, FileConfig, JsonlConversationLogger, OllamaGateway};
use council_presentation::{
    AppState, ChatRepl, Cli, ConsoleFormatter, CouncilServer, ProgressReporter, shutdown_on_signal,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the subscriber; the guard must live as long as file logging should
fn init_tracing(cli: &Cli) -> Option<WorkerGuard> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match &cli.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "llm-council.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue);
    }
    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| format!("  {}", i))
        .collect();
    if !errors.is_empty() {
        bail!(
            "Invalid configuration:\n{}\n\nDefine [[council.members]] and [chairman] in ./council.toml \
             (see council.example.toml) or pass --config <path>.",
            errors.join("\n")
        );
    }

    Ok(config)
}

fn transcript_logger(config: &FileConfig) -> Option<Arc<dyn ConversationLogger>> {
    let path = config.logging.transcript.as_ref()?;
    let logger = JsonlConversationLogger::new(path)?;
    info!("Writing session transcript to {}", logger.path().display());
    Some(Arc::new(logger))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(&cli);

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting LLM Council");

    let config = load_config(&cli)?;
    ConsoleFormatter::set_color(config.output.color);

    let council = Arc::new(config.to_council()?);
    let params: ExecutionParams = config.to_execution_params();

    // === Dependency Injection ===
    let gateway = Arc::new(
        OllamaGateway::new(
            config.behavior.connect_timeout(),
            params.request_timeout,
            params.probe_timeout,
        )
        .context("Failed to create HTTP client")?,
    );

    let health = Arc::new(CheckHealthUseCase::new(
        Arc::clone(&gateway) as Arc<dyn HealthProbe>,
        Arc::clone(&council),
        params.probe_timeout,
    ));

    let mut use_case = RunCouncilUseCase::new(gateway, Arc::clone(&council), params);
    if let Some(logger) = transcript_logger(&config) {
        use_case = use_case.with_logger(logger);
    }
    let use_case = Arc::new(use_case);

    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    // Health mode
    if cli.health {
        let report = health.execute().await;
        println!("{}", ConsoleFormatter::format_health(&report));
        return Ok(());
    }

    // Server mode
    if cli.serve {
        let host = cli.host.clone().unwrap_or(config.server.host.clone());
        let port = cli.port.unwrap_or(config.server.port);

        let shutdown = CancellationToken::new();
        tokio::spawn(shutdown_on_signal(shutdown.clone()));

        CouncilServer::new(AppState::new(use_case, health), host, port)
            .run(shutdown)
            .await?;
        return Ok(());
    }

    // Chat mode
    if cli.chat {
        let repl = ChatRepl::new(use_case, health)
            .with_progress(!cli.quiet && config.repl.show_progress)
            .with_format(format)
            .with_history(config.repl.history_path());

        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question.as_deref() {
        Some(q) => Question::parse(q).context("Invalid question")?,
        None => bail!("Question is required. Use --chat for interactive mode or --serve for the HTTP API."),
    };

    if !cli.quiet && format != OutputFormat::Json {
        println!();
        println!("Question: {}", question);
        println!(
            "Council:  {} (chairman: {})",
            council.roster.names().join(", "),
            council.chairman.endpoint.model
        );
        println!();
    }

    let result = if cli.quiet {
        use_case.execute(&question).await
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(&question, &progress).await
    };

    println!("{}", ConsoleFormatter::render(&result, format));

    Ok(())
}
