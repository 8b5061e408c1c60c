//! CLI entrypoint for consortium
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use consortium_application::{
    ConsortiumContext, InMemoryQuotaStore, NoProgress, ProgressNotifier, ProviderDispatcher,
    QuotaLedger, QuotaStore, RunConversationInput,
};
use consortium_domain::{ConfigIssue, OutputFormat};
use consortium_infrastructure::{
    ConfigLoader, FileLoggingConfig, JsonFileQuotaStore, JsonlConversationLogger, ResolvedConfig,
    build_providers,
};
use consortium_presentation::{
    Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over `-v`. Console output goes to stderr so stdout stays
/// clean for `-o json`; a daily-rolling file is added when `[logging] dir`
/// is set. The returned guard must live until exit to flush the file.
fn init_tracing(verbose: u8, logging: &FileLoggingConfig) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match logging.dir_path() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "consortium.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()
        .ok();

    guard
}

fn quota_store(config: &ResolvedConfig) -> Arc<dyn QuotaStore> {
    match config
        .quota_state_path
        .clone()
        .or_else(JsonFileQuotaStore::default_path)
    {
        Some(path) => {
            debug!(path = %path.display(), "Quota state file");
            Arc::new(JsonFileQuotaStore::new(path))
        }
        None => {
            warn!("No data directory available, quota usage is tracked in memory only");
            Arc::new(InMemoryQuotaStore::new())
        }
    }
}

fn report_warnings(warnings: &[ConfigIssue]) {
    for issue in warnings {
        warn!("{}", issue.message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    let (config, warnings) = file_config.resolve()?;

    let _log_guard = init_tracing(cli.verbose, &config.logging);
    info!("Starting consortium");
    report_warnings(&warnings);

    // === Dependency Injection ===
    let mut settings = config.dispatch;
    if cli.offline {
        settings.offline = true;
    }

    let ledger = Arc::new(QuotaLedger::new(config.quota_limits, quota_store(&config)));
    let providers = build_providers(config.providers.clone());
    let dispatcher = Arc::new(ProviderDispatcher::new(providers, ledger, settings));

    if !settings.offline {
        dispatcher.refresh_liveness().await;
    }

    if cli.show_providers {
        print!(
            "{}",
            ConsoleFormatter::format_provider_status(
                &dispatcher.status(),
                &dispatcher.quota_snapshot()
            )
        );
        return Ok(());
    }

    let brief = match cli.brief.as_deref() {
        Some(b) if !b.trim().is_empty() => b.to_string(),
        _ => bail!("A project brief is required, e.g. consortium \"A marketplace for vintage cameras\""),
    };

    let mut context =
        ConsortiumContext::new(dispatcher, config.roster.clone(), config.bounds);
    if let Some(dir) = config.logging.conversation_log_dir()
        && let Some(logger) = JsonlConversationLogger::in_dir(dir)
    {
        info!(path = %logger.path().display(), "Conversation transcript enabled");
        context = context.with_logger(Arc::new(logger));
    }

    let input = RunConversationInput::new(
        brief,
        cli.selection(&config.default_selection),
        cli.rounds.unwrap_or(config.bounds.default_rounds),
    )
    .with_report_style(cli.style.unwrap_or(config.report_style));

    let progress: Box<dyn ProgressNotifier> = if cli.quiet || !config.output.show_progress {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let outcome = context
        .conversation_use_case()
        .execute_with_progress(input, progress.as_ref())
        .await?;

    // === Output ===
    let format = cli.output.or(config.output.format).unwrap_or_default();
    if !config.output.color || matches!(format, OutputFormat::Json | OutputFormat::Markdown) {
        colored::control::set_override(false);
    }
    println!("{}", ConsoleFormatter.render(&outcome, format));

    Ok(())
}
