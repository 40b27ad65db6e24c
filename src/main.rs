use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use git_files_changed::{render, Cancellation, ChangeLister, Config, OutputFormat, PathFilter};

#[derive(Parser)]
#[command(name = "git-files-changed")]
#[command(about = "List the files that changed between two git revisions")]
#[command(version)]
struct Cli {
    /// Path to the repository (must be the repository root)
    #[arg(default_value = ".")]
    repo: PathBuf,

    /// Head reference (default: HEAD, or refs.head from the config file)
    #[arg(long)]
    head: Option<String>,

    /// Base reference (default: main, or refs.base from the config file)
    #[arg(long)]
    base: Option<String>,

    /// Path to config file (default: <repo>/files-changed.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only list paths matching this glob (repeatable)
    #[arg(long = "include")]
    include: Vec<String>,

    /// Drop paths matching this glob (repeatable)
    #[arg(long = "exclude")]
    exclude: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Prefix each path with its change action (A/M/D)
    #[arg(long)]
    status: bool,

    /// Show debug logs on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("git_files_changed=debug")
        } else {
            EnvFilter::new("git_files_changed=warn")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => {
            Config::load(path).with_context(|| format!("Could not load {}", path.display()))?
        }
        None => Config::load_or_default(&cli.repo)?,
    };

    let head = cli.head.unwrap_or_else(|| config.refs.head.clone());
    let base = cli.base.unwrap_or_else(|| config.refs.base.clone());

    // Flags replace the config file's patterns instead of adding to them.
    let filter = if cli.include.is_empty() && cli.exclude.is_empty() {
        config.path_filter()?
    } else {
        PathFilter::new(&cli.include, &cli.exclude)?
    };

    let lister = ChangeLister::new().head(head.as_str()).base(base.as_str());
    let changes = lister
        .list_changes(&cli.repo, &Cancellation::new())
        .with_context(|| format!("Could not list changes between '{}' and '{}'", head, base))?;
    let changes = filter.apply(changes);

    tracing::debug!(count = changes.len(), "listing changed files");

    let out = render(&changes, cli.format, cli.status)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(out.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
