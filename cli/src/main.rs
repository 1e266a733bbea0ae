//! CLI entrypoint for ai-tribunal
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tribunal_application::{
    ConversationLogger, DeliberationUseCase, InvocationProgress, LlmGateway, NoConversationLogger,
    NoProgress, PendingFile, ResilientInvoker, UploadFilesUseCase,
};
use tribunal_domain::{CaseState, FileRef, Side};
use tribunal_infrastructure::{
    ConfigLoader, FileConfig, GeminiConfig, GeminiGateway, JsonCaseStore,
    JsonlConversationLogger, LocalFileStorage,
};
use tribunal_presentation::api::{ArgumentRequest, CaseRequest, RethinkRequest, SubmitRequest};
use tribunal_presentation::{
    ApiResponse, Cli, Command, ConsoleFormatter, CourtApi, OutputFormat, ProgressReporter,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).map_err(|e| anyhow::Error::new(*e))?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        println!("\n{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("{}", ConsoleFormatter::format_error(&issue.to_string()));
        }
        bail!("Invalid configuration ({} problem(s))", issues.len());
    }

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let store = JsonCaseStore::new(&cli.case);
    let case = store.load()?;
    info!(case = %store.path().display(), phase = %case.phase(), "Loaded case");

    if command == Command::Show {
        match cli.output {
            OutputFormat::Text => print!("{}", ConsoleFormatter::format_case(&case)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&case)?),
        }
        return Ok(());
    }

    let cancellation = CancellationToken::new();
    let court = build_court(&cli, &config, cancellation.clone())?;

    {
        let token = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted; abandoning the pending adjudication");
                token.cancel();
            }
        });
    }

    let response = match command.clone() {
        Command::Submit {
            side,
            primary_argument,
            evidence,
            response,
            files,
        } => {
            let files = upload_files(&config, side, &files).await?;
            court
                .submit(SubmitRequest {
                    side,
                    primary_argument,
                    detailed_evidence: evidence,
                    response_to_other_side: response,
                    files,
                    case_data: case,
                })
                .await
        }
        Command::Interim => {
            court
                .generate_interim_verdict(CaseRequest { case_data: case })
                .await
        }
        Command::Argue { side, argument } => {
            court
                .post_argument(ArgumentRequest {
                    side,
                    argument_text: argument,
                    case_data: case,
                    current_verdict: None,
                })
                .await
        }
        Command::Rethink => {
            court
                .rethink(RethinkRequest {
                    case_data: case,
                    current_verdict: None,
                })
                .await
        }
        Command::Conclude => court.conclude(CaseRequest { case_data: case }).await,
        Command::Show => unreachable!("handled above"),
    };

    if let Some(updated) = &response.case_data {
        store.save(updated)?;
    }
    render(&cli, &command, &response)?;

    if !response.success {
        std::process::exit(1);
    }
    Ok(())
}

/// Wire gateway, invoker and use case into the court surface.
fn build_court(cli: &Cli, config: &FileConfig, cancellation: CancellationToken) -> Result<CourtApi> {
    let api_key = std::env::var(&config.backend.api_key_env).with_context(|| {
        format!(
            "Set {} to the text-generation API key",
            config.backend.api_key_env
        )
    })?;

    let gateway: Arc<dyn LlmGateway> = Arc::new(GeminiGateway::new(GeminiConfig {
        base_url: config.backend.base_url.clone(),
        api_key,
        timeout: config.backend.timeout(),
    })?);

    let preferred = ConfigLoader::preferred_model();
    let params = config.invocation.to_invocation_params(preferred.as_deref());
    info!(
        models = ?params.models.iter().map(|m| m.as_str()).collect::<Vec<_>>(),
        "Fallback chain"
    );

    let progress: Arc<dyn InvocationProgress> = if cli.quiet || cli.output == OutputFormat::Json {
        Arc::new(NoProgress)
    } else {
        Arc::new(ProgressReporter::new())
    };

    let invoker = ResilientInvoker::new(gateway, params)
        .with_progress(progress)
        .with_cancellation(cancellation);

    let logger: Arc<dyn ConversationLogger> = match &config.logging.conversation_log {
        Some(path) => match JsonlConversationLogger::open(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoConversationLogger),
        },
        None => Arc::new(NoConversationLogger),
    };

    let deliberation =
        DeliberationUseCase::new(Arc::new(invoker), config.storage.to_deliberation_params())
            .with_conversation_logger(logger);
    Ok(CourtApi::new(deliberation))
}

/// Read and upload attachments; unreadable files are skipped with a warning.
async fn upload_files(config: &FileConfig, side: Side, paths: &[PathBuf]) -> Result<Vec<FileRef>> {
    if paths.is_empty() {
        return Ok(Vec::new());
    }

    let mut pending = Vec::with_capacity(paths.len());
    for path in paths {
        match tokio::fs::read(path).await {
            Ok(bytes) => pending.push(PendingFile::new(file_name(path), bytes)),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    let storage = Arc::new(LocalFileStorage::new(
        &config.storage.directory,
        config.storage.max_file_size,
    ));
    let uploader = UploadFilesUseCase::new(storage, config.storage.max_file_size);
    Ok(uploader.execute(side, pending).await)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn render(cli: &Cli, command: &Command, response: &ApiResponse) -> Result<()> {
    if cli.output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    if let Some(error) = &response.error {
        eprint!("{}", ConsoleFormatter::format_error(&error.message));
        return Ok(());
    }

    let case = response.case_data.clone().unwrap_or_else(CaseState::new);
    let output = match command {
        Command::Submit { side, .. } => match case.interim_verdict() {
            Some(verdict) => format!(
                "{} submitted. Deliberation has begun.\n\n{}",
                side.label(),
                ConsoleFormatter::format_interim(verdict)
            ),
            None => format!(
                "{} submitted. Waiting for {}.\n",
                side.label(),
                side.opponent().label()
            ),
        },
        Command::Interim => case
            .interim_verdict()
            .map(ConsoleFormatter::format_interim)
            .unwrap_or_default(),
        Command::Argue { side, .. } => ConsoleFormatter::format_reply(
            *side,
            response.response.as_deref().unwrap_or_default(),
            response.remaining_rounds.unwrap_or_default(),
        ),
        Command::Rethink => case
            .rethink_verdict()
            .map(ConsoleFormatter::format_rethink)
            .unwrap_or_default(),
        Command::Conclude => case
            .final_verdict()
            .map(|v| ConsoleFormatter::format_final(v, response.metadata.as_ref()))
            .unwrap_or_default(),
        Command::Show => ConsoleFormatter::format_case(&case),
    };
    print!("{}", output);
    Ok(())
}
