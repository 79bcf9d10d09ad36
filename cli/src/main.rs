//! CLI entrypoint for pdraft
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use pdraft_application::{
    GenerateDocumentUseCase, GenerateInput, GenerationProgress, HistoryService,
    NoGenerationProgress, SessionManager, SessionNotifier, SettingsService,
};
use pdraft_infrastructure::{
    ConfigLoader, FileSettingsCache, HttpCompilerGateway, HttpGeneratorGateway,
    JsonlTranscriptLogger, RestAccountStore, RestHistoryStore, RestIdentityProvider, build_client,
};
use pdraft_presentation::{ChatRepl, Cli, ConsoleNotifier, ProgressReporter};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    info!("Using backend {}", config.api.base_url);

    // === Dependency Injection ===
    let client = build_client(config.api.timeout_secs)?;

    let identity = Arc::new(RestIdentityProvider::new(
        client.clone(),
        config.auth_base_url(),
    ));
    let accounts = Arc::new(RestAccountStore::new(
        client.clone(),
        config.api.base_url.clone(),
    ));
    let history_store = Arc::new(RestHistoryStore::new(
        client.clone(),
        config.api.base_url.clone(),
    ));
    let generator = Arc::new(HttpGeneratorGateway::new(
        client.clone(),
        config.api.base_url.clone(),
    ));
    let compiler = Arc::new(HttpCompilerGateway::new(
        client,
        config.api.base_url.clone(),
    ));

    let cache_path = FileSettingsCache::default_path()
        .unwrap_or_else(|| PathBuf::from("pdraft-settings.json"));
    let settings_service = SettingsService::new(Arc::new(FileSettingsCache::new(cache_path)));
    let history_service = HistoryService::new();

    let mut use_case = GenerateDocumentUseCase::new(generator, compiler);
    if let Some(dir) = &config.transcript.log_dir {
        let path = dir.join(format!(
            "pdraft-{}.jsonl",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));
        if let Some(logger) = JsonlTranscriptLogger::new(&path) {
            info!("Writing transcript log to {}", logger.path().display());
            use_case = use_case.with_transcript_logger(Arc::new(logger));
        }
    }

    let notifier: Arc<dyn SessionNotifier> = Arc::new(ConsoleNotifier);
    let mut sessions = SessionManager::new(identity, accounts, history_store, notifier.clone());

    // Establish a session up front when the flags allow it; chat mode can
    // also sign in interactively.
    if cli.guest {
        sessions.enter_as_guest();
    } else if let Some(email) = &cli.email {
        let password = prompt_password()?;
        sessions.sign_in(email, &password).await?;
    }

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(
            sessions,
            settings_service,
            history_service,
            use_case,
            notifier,
        )
        .with_progress(!cli.quiet);

        repl.run().await?;
        return Ok(());
    }

    // One-shot mode - title and description are required
    let (Some(title), Some(description)) = (cli.title, cli.description) else {
        bail!("Provide --title and --description, or use --chat for interactive mode.");
    };
    if !sessions.has_session() {
        bail!("Sign in with --email <email> or use --guest.");
    }

    let settings = settings_service.load(sessions.context()).await;
    let input = GenerateInput::new(title, description, settings);

    let progress: Box<dyn GenerationProgress> = if cli.quiet {
        Box::new(NoGenerationProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let Some(ctx) = sessions.context_mut() else {
        bail!("No active session.");
    };
    let output = use_case
        .execute(input, ctx, notifier.as_ref(), progress.as_ref())
        .await?;

    println!("{}", output.pdf_url);
    if !cli.quiet {
        println!("Cost: {} credits", output.cost);
        if !output.saved && !cli.guest {
            eprintln!("Note: this document could not be saved to history.");
        }
    }

    Ok(())
}

/// Read the account password from stdin.
fn prompt_password() -> Result<String> {
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut buf = String::new();
    std::io::stdin().read_line(&mut buf)?;
    Ok(buf.trim_end_matches(['\n', '\r']).to_string())
}
