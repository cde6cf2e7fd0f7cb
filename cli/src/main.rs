//! CLI entrypoint for llm-council
//!
//! Wires the layers together: configuration, the OpenRouter invoker, the
//! conversation store, progress reporting, and the council use case.

use anyhow::{Context, Result, bail};
use clap::Parser;
use council_application::{
    ConversationStore, GenerateTitleUseCase, RunCouncilInput, RunCouncilUseCase,
};
use council_domain::{Attachment, CouncilQuery, CouncilRoster, ConversationTurn, ModelId};
use council_infrastructure::{ConfigLoader, FileConfig, JsonConversationStore, OpenRouterInvoker};
use council_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
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
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };

    let issues = config.validate();
    for issue in &issues {
        warn!("config: {}: {}", issue.field, issue.message);
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("configuration is invalid; see warnings above");
    }

    if cli.show_config {
        print_config_locations(&cli);
        return Ok(ExitCode::SUCCESS);
    }

    if !config.output.color {
        ConsoleFormatter::set_color_enabled(false);
    }

    // === Conversation store ===
    let store = if config.storage.persist && !cli.no_store {
        let data_dir = config.storage.resolve_data_dir();
        Some(JsonConversationStore::open(&data_dir).with_context(|| {
            format!("failed to open conversation store at {}", data_dir.display())
        })?)
    } else {
        None
    };

    // Store maintenance flags short-circuit before any council run
    if cli.list || cli.show.is_some() || cli.delete.is_some() {
        let store = store
            .as_ref()
            .context("conversation storage is disabled")?;
        return manage_store(&cli, store);
    }

    let prompt = match &cli.prompt {
        Some(prompt) => prompt.clone(),
        None => bail!("a question is required; see --help"),
    };

    // An unknown --conversation id should fail before any model is called
    if let Some(id) = &cli.conversation {
        let store = store
            .as_ref()
            .context("--conversation requires storage to be enabled")?;
        store
            .load(id)
            .with_context(|| format!("cannot append to conversation {id}"))?;
    }

    // === Council composition (flags beat file beats defaults) ===
    let configured = config.council.to_roster();
    let members: Vec<ModelId> = if cli.model.is_empty() {
        configured.members().to_vec()
    } else {
        cli.model.iter().map(|m| ModelId::from(m.as_str())).collect()
    };
    let chairman = match &cli.chairman {
        Some(name) => ModelId::from(name.as_str()),
        None => configured.chairman().clone(),
    };
    let roster = CouncilRoster::new(members, chairman);
    roster.validate()?;

    let attachments = load_attachments(&cli.attach)?;
    let attachment_names: Vec<String> = attachments.iter().map(|a| a.name.clone()).collect();

    let query = CouncilQuery::try_new(prompt.clone(), roster)?.with_attachments(attachments);
    let mut input = RunCouncilInput::new(query).with_params(config.to_params());
    if let Some(seed) = cli.seed {
        input = input.with_anonymizer_seed(seed);
    }

    let format = cli.output.unwrap_or_else(|| {
        config
            .output
            .format
            .as_deref()
            .map(OutputFormat::from_config_name)
            .unwrap_or(OutputFormat::Full)
    });

    // === Dependency injection ===
    let invoker = Arc::new(
        OpenRouterInvoker::from_env(&config.invoker.api_key_env)?
            .with_base_url(config.invoker.base_url.clone()),
    );

    // Ctrl-C cancels the whole turn; in-flight calls are aborted
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let use_case = RunCouncilUseCase::new(Arc::clone(&invoker)).with_cancellation(cancel);

    info!("Starting council run");

    // === Run ===
    let show_progress = !cli.quiet && config.output.progress;
    let result = if !show_progress {
        use_case.execute(input).await
    } else if format == OutputFormat::Json {
        // Bars would interleave with piped JSON; plain stderr lines instead
        use_case.execute_with_progress(input, &SimpleProgress).await
    } else {
        let reporter = ProgressReporter::new();
        use_case.execute_with_progress(input, &reporter).await
    };

    // === Render and persist ===
    match result {
        Ok(verdict) => {
            let rendered = match format {
                OutputFormat::Full => ConsoleFormatter::format(&verdict),
                OutputFormat::Final => ConsoleFormatter::format_final(&verdict),
                OutputFormat::Json => ConsoleFormatter::format_json(&verdict),
            };
            println!("{rendered}");

            if let Some(store) = &store {
                let turn = |sequence, created_at: String| {
                    ConversationTurn::completed(
                        sequence,
                        created_at,
                        &prompt,
                        attachment_names.clone(),
                        verdict.clone(),
                    )
                };
                persist_turn(store, &cli, &config, &invoker, &prompt, turn, cli.quiet).await?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_cancelled() => {
            eprintln!("Cancelled.");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            eprintln!("Council failed: {e} ({})", e.reason_code());
            if let Some(store) = &store {
                let reason = e.reason_code().to_string();
                let turn = |sequence, created_at: String| {
                    ConversationTurn::aborted(
                        sequence,
                        created_at,
                        &prompt,
                        attachment_names.clone(),
                        reason.clone(),
                    )
                };
                persist_turn(store, &cli, &config, &invoker, &prompt, turn, cli.quiet).await?;
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Record one turn, creating and titling the conversation when it is new
async fn persist_turn(
    store: &JsonConversationStore,
    cli: &Cli,
    config: &FileConfig,
    invoker: &Arc<OpenRouterInvoker>,
    prompt: &str,
    make_turn: impl FnOnce(u64, String) -> ConversationTurn,
    quiet: bool,
) -> Result<()> {
    let (conversation, is_new) = match &cli.conversation {
        Some(id) => (store.load(id)?, false),
        None => (store.create()?, true),
    };

    let created_at = chrono::Utc::now().to_rfc3339();
    let turn = make_turn(conversation.next_sequence(), created_at);
    let completed = turn.is_completed();
    store.record_turn(&conversation.id, turn)?;

    // Titles are cosmetic; a failed title call never fails the turn
    if is_new && completed {
        let mut titler = GenerateTitleUseCase::new(Arc::clone(invoker));
        if let Some(model) = &config.invoker.title_model {
            titler = titler.with_model(ModelId::from(model.as_str()));
        }
        let title = titler.execute(prompt).await;
        if let Err(e) = store.set_title(&conversation.id, &title) {
            warn!("Failed to store conversation title: {}", e);
        }
    }

    if !quiet {
        eprintln!("Saved to conversation {}", conversation.id);
    }
    Ok(())
}

/// Handle `--list`, `--show`, and `--delete`
fn manage_store(cli: &Cli, store: &JsonConversationStore) -> Result<ExitCode> {
    if cli.list {
        let summaries = store.list()?;
        print!("{}", ConsoleFormatter::format_conversation_list(&summaries));
    } else if let Some(id) = &cli.show {
        let conversation = store.load(id)?;
        print!("{}", ConsoleFormatter::format_conversation(&conversation));
    } else if let Some(id) = &cli.delete {
        store.delete(id)?;
        eprintln!("Deleted conversation {id}");
    }
    Ok(ExitCode::SUCCESS)
}

fn print_config_locations(cli: &Cli) {
    println!("Configuration sources (lowest to highest priority):");
    println!("  built-in defaults");
    if let Some(path) = ConfigLoader::global_config_path() {
        let marker = if path.exists() { " (found)" } else { "" };
        println!("  {}{}", path.display(), marker);
    }
    for name in ["council.toml", ".council.toml"] {
        let marker = if Path::new(name).exists() { " (found)" } else { "" };
        println!("  ./{name}{marker}");
    }
    if let Some(path) = &cli.config {
        println!("  {} (--config)", path.display());
    }
}

/// Read the attached files, inferring media types from extensions
fn load_attachments(paths: &[std::path::PathBuf]) -> Result<Vec<Attachment>> {
    paths
        .iter()
        .map(|path| {
            let data = std::fs::read(path)
                .with_context(|| format!("cannot read attachment {}", path.display()))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(Attachment::new(name, media_type_for(path), data))
        })
        .collect()
}

fn media_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "json" => "application/json",
        "html" | "htm" => "text/html",
        "md" | "markdown" => "text/markdown",
        // Anything else is treated as inlineable text; non-UTF-8 content
        // is dropped from inlining by the domain anyway.
        _ => "text/plain",
    }
}
