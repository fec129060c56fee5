use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use mangasort::{cli, config, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sort the source directory into per-title folders
    Organize(OrganizeOptions),

    /// Show the author and title parsed from file names
    Parse(ParseOptions),

    /// List cached translations
    Cache(CacheOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct OrganizeOptions {
    /// Flat directory holding the archives [env: MANGASORT_SOURCE_DIR]
    #[clap(long)]
    pub source: Option<PathBuf>,

    /// Directory receiving one folder per title [env: MANGASORT_TARGET_DIR]
    #[clap(long)]
    pub target: Option<PathBuf>,

    /// Translation cache snapshot [env: MANGASORT_CACHE_FILE]
    #[clap(long)]
    pub cache_file: Option<PathBuf>,

    /// Chat completion endpoint used for translation [env: MANGASORT_API_URL]
    #[clap(long)]
    pub api_url: Option<String>,

    /// Model name sent to the endpoint [env: MANGASORT_MODEL]
    #[clap(long)]
    pub model: Option<String>,

    /// Number of parallel workers [env: MANGASORT_WORKERS]
    #[clap(long)]
    pub workers: Option<usize>,

    /// Seconds between cache snapshots [env: MANGASORT_FLUSH_INTERVAL]
    #[clap(long)]
    pub flush_interval: Option<u64>,

    /// Seconds before a translation request is abandoned [env: MANGASORT_TIMEOUT]
    #[clap(long)]
    pub timeout: Option<u64>,

    /// Keep titles untranslated and skip the translation service
    #[clap(long)]
    pub no_translate: bool,

    /// Copy files instead of moving them
    #[clap(long)]
    pub copy: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ParseOptions {
    /// File names to parse
    #[clap(required = true)]
    pub names: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CacheOptions {
    /// Only show entries containing this text
    #[clap(long)]
    pub search: Option<String>,

    /// Translation cache snapshot [env: MANGASORT_CACHE_FILE]
    #[clap(long)]
    pub cache_file: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

impl From<OrganizeOptions> for config::Overrides {
    fn from(opt: OrganizeOptions) -> Self {
        config::Overrides {
            source_dir: opt.source,
            target_dir: opt.target,
            cache_file: opt.cache_file,
            api_url: opt.api_url,
            model: opt.model,
            workers: opt.workers,
            flush_interval: opt.flush_interval,
            timeout: opt.timeout,
            no_translate: opt.no_translate,
            copy: opt.copy,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Organize(opt) => cli::organize(opt.into()).await,
        Command::Parse(opt) => cli::parse(opt.names),
        Command::Cache(opt) => cli::cache(opt.cache_file, opt.search).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
