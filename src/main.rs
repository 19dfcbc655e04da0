// ABOUTME: Entry point for the docwarden binary.
// ABOUTME: Parses CLI arguments, initializes tracing, and dispatches to the docs, tool, and server commands.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use docwarden_core::catalog::DEFAULT_SITE_PREFIX;
use docwarden_core::health::{
    DEFAULT_RECENT_WITHIN_WEEKS, DEFAULT_STALE_AFTER_DAYS, MAX_RECENT_WITHIN_WEEKS,
    MAX_STALE_AFTER_DAYS, append_ci_outputs,
};
use docwarden_core::layout::{DEFAULT_DOCS_DIRECTORY, DEFAULT_REPORT_FILENAME};
use docwarden_core::{CatalogOptions, DocsLayout, GitLog, HealthPolicy, collect_cards};
use docwarden_tools::{Route, SessionState, UserContent, build_registry, install_capital_hooks};

/// Docs maintenance toolkit.
#[derive(Parser)]
#[command(name = "docwarden", about = "Docs health, version and catalog reports plus agent snippet tools", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flag stale docs pages and rewrite the health section of the report.
    Health(HealthArgs),

    /// Group docs pages by front-matter version and rewrite the version section.
    Versions(LayoutArgs),

    /// Render catalog cards for pages matching a glob.
    Catalog(CatalogArgs),

    /// Run the mock user-info API.
    Serve,

    /// List or invoke a snippet tool.
    Tool(ToolArgs),

    /// Show which branch a user message routes to.
    Route {
        /// The user message.
        text: String,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Repository root.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Docs directory, relative to the root.
    #[arg(long, default_value = DEFAULT_DOCS_DIRECTORY)]
    docs_dir: PathBuf,

    /// Report file, relative to the root.
    #[arg(long, default_value = DEFAULT_REPORT_FILENAME)]
    report: PathBuf,
}

impl LayoutArgs {
    fn layout(&self) -> DocsLayout {
        DocsLayout {
            root: self.root.clone(),
            docs_dir: self.docs_dir.clone(),
            report_file: self.report.clone(),
        }
    }
}

#[derive(Args)]
struct HealthArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    /// Days without a commit before a page counts as stale.
    #[arg(
        long,
        default_value_t = DEFAULT_STALE_AFTER_DAYS,
        value_parser = clap::value_parser!(i64).range(1..=MAX_STALE_AFTER_DAYS)
    )]
    stale_days: i64,

    /// Weeks within which a commit counts as a recent update.
    #[arg(
        long,
        default_value_t = DEFAULT_RECENT_WITHIN_WEEKS,
        value_parser = clap::value_parser!(i64).range(1..=MAX_RECENT_WITHIN_WEEKS)
    )]
    recent_weeks: i64,

    /// CI step output file to append `recent_percentage` and `exit_code` to.
    #[arg(long, env = "GITHUB_OUTPUT")]
    github_output: Option<PathBuf>,
}

#[derive(Args)]
struct CatalogArgs {
    /// Glob relative to the docs directory, e.g. `integrations/*.md`.
    pattern: String,

    #[arg(long, default_value = DEFAULT_DOCS_DIRECTORY)]
    docs_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_SITE_PREFIX)]
    site_prefix: String,

    /// Write the HTML here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the cards as JSON instead of HTML.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ToolArgs {
    /// List registered tools.
    #[arg(long, conflicts_with = "name")]
    list: bool,

    /// Run calls through the capital-city hooks.
    #[arg(long)]
    capital_hooks: bool,

    /// Tool to invoke.
    name: Option<String>,

    /// JSON arguments object.
    #[arg(default_value = "{}")]
    args: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "docwarden=debug,tower_http=debug"
    } else {
        "docwarden=info,tower_http=debug"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Health(args) => health(args),
        Commands::Versions(args) => versions(args),
        Commands::Catalog(args) => catalog(args),
        Commands::Serve => serve().await,
        Commands::Tool(args) => tool(args).await,
        Commands::Route { text } => {
            let route = Route::for_message(Some(&UserContent::from_text(text)));
            tracing::debug!("routing to {} ({})", route.agent_name(), route.tool_name());
            println!("{}", route);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn health(args: HealthArgs) -> anyhow::Result<ExitCode> {
    let layout = args.layout.layout();
    let policy = HealthPolicy::new(args.stale_days, args.recent_weeks)?;
    let now = chrono::Local::now().fixed_offset();

    let report = layout
        .run_health(&GitLog::new(&layout.root), now, policy)
        .with_context(|| format!("health scan of {}", layout.docs_path().display()))?;

    if let Some(path) = args.github_output {
        append_ci_outputs(&path, &report)
            .with_context(|| format!("writing CI outputs to {}", path.display()))?;
    }

    println!("Docs Health Analysis done.");
    Ok(ExitCode::from(report.exit_code()))
}

fn versions(args: LayoutArgs) -> anyhow::Result<ExitCode> {
    let layout = args.layout();
    let report = layout
        .run_versions()
        .with_context(|| format!("version scan of {}", layout.docs_path().display()))?;

    println!(
        "Version report written to {} ({} versions, {} unversioned pages).",
        layout.report_path().display(),
        report.by_version.len(),
        report.unversioned.len()
    );
    Ok(ExitCode::SUCCESS)
}

fn catalog(args: CatalogArgs) -> anyhow::Result<ExitCode> {
    let options = CatalogOptions::new(&args.docs_dir).with_site_prefix(&args.site_prefix);
    let cards = collect_cards(&options, &args.pattern)
        .with_context(|| format!("collecting catalog cards for {}", args.pattern))?;

    let rendered = if args.json {
        serde_json::to_string_pretty(&cards)?
    } else {
        docwarden_core::catalog::render_cards(&cards)?
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("wrote {} cards to {}", cards.len(), path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(ExitCode::SUCCESS)
}

async fn serve() -> anyhow::Result<ExitCode> {
    let config = docwarden_server::ServerConfig::from_env()?;
    docwarden_server::serve(config).await?;
    Ok(ExitCode::SUCCESS)
}

async fn tool(args: ToolArgs) -> anyhow::Result<ExitCode> {
    let registry = build_registry(SessionState::new()).await;
    if args.capital_hooks {
        install_capital_hooks(&registry).await;
    }

    if args.list {
        tracing::info!("{} tools registered", registry.len().await);
        println!("{}", serde_json::to_string_pretty(&registry.list().await)?);
        return Ok(ExitCode::SUCCESS);
    }

    let Some(name) = args.name else {
        bail!("pass a tool name or --list");
    };
    let params: serde_json::Value =
        serde_json::from_str(&args.args).context("tool arguments must be a JSON object")?;

    let result = registry.call(&name, params).await?;
    println!("{}", serde_json::to_string_pretty(&result.content)?);
    Ok(if result.is_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
