mod cmd_config;
mod cmd_edit;
mod cmd_export;
mod cmd_list;
mod cmd_url;
mod session;

use clap::{Parser, Subcommand};
use fnhist_core::Command as HistoryCommand;
use fnhist_store::StorePaths;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fnhist",
    version,
    about = "Record, arrange and export function call trails"
)]
struct Cli {
    /// Store directory (defaults to $FNHIST_HOME or the user data dir)
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    /// Page the session belongs to; recording is refused unless an active
    /// URL pattern matches it
    #[arg(long, global = true)]
    page: Option<String>,
    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a function as a new root entry
    Add {
        /// Function name as displayed
        name: String,
        /// Link to the definition (relative links resolve against --page)
        #[arg(long)]
        link: Option<String>,
    },
    /// Show the recorded history
    List {
        /// Output as JSON lines (one entry per line)
        #[arg(long)]
        json: bool,
    },
    /// Delete the entry at INDEX
    Delete { index: usize },
    /// Increase the level of the entry at INDEX
    Indent { index: usize },
    /// Decrease the level of the entry at INDEX
    Outdent { index: usize },
    /// Move the entry at INDEX up
    Up { index: usize },
    /// Move the entry at INDEX down
    Down { index: usize },
    /// Replace the link of the entry at INDEX
    EditLink { index: usize, link: String },
    /// Remove every entry
    Clear {
        /// Confirm clearing the whole history
        #[arg(long)]
        yes: bool,
    },
    /// Print the formatted history (or write it to a file)
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report level jumps larger than one step
    Check,
    /// Render a sample history with the current settings
    Preview,
    /// Read or write settings
    Config {
        #[command(subcommand)]
        cmd: cmd_config::ConfigCmd,
    },
    /// Manage the pages recording is enabled on
    Url {
        #[command(subcommand)]
        cmd: cmd_url::UrlCmd,
    },
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("FNHIST_LOG").unwrap_or_else(|_| {
        if verbose {
            "fnhist=debug,fnhist_core=debug,fnhist_store=debug,fnhist_gate=debug".to_string()
        } else {
            "fnhist=info,fnhist_core=warn,fnhist_store=warn,fnhist_gate=warn".to_string()
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = match cli.store {
        Some(dir) => StorePaths::discover(dir),
        None => StorePaths::default_location(),
    };
    let page = cli.page.as_deref();
    tracing::debug!(store = %paths.root.display(), ?page, "starting");

    match cli.cmd {
        Command::Add { name, link } => cmd_edit::record(paths, page, &name, link.as_deref()),
        Command::List { json } => cmd_list::list(paths, page, json),
        Command::Delete { index } => {
            cmd_edit::execute(paths, page, HistoryCommand::Delete(index))
        }
        Command::Indent { index } => {
            cmd_edit::execute(paths, page, HistoryCommand::IncreaseLevel(index))
        }
        Command::Outdent { index } => {
            cmd_edit::execute(paths, page, HistoryCommand::DecreaseLevel(index))
        }
        Command::Up { index } => cmd_edit::execute(paths, page, HistoryCommand::MoveUp(index)),
        Command::Down { index } => {
            cmd_edit::execute(paths, page, HistoryCommand::MoveDown(index))
        }
        Command::EditLink { index, link } => {
            cmd_edit::execute(paths, page, HistoryCommand::EditLink { index, link })
        }
        Command::Clear { yes } => cmd_edit::clear(paths, page, yes),
        Command::Export { output } => cmd_export::export(paths, page, output.as_deref()),
        Command::Check => cmd_list::check(paths, page),
        Command::Preview => cmd_export::preview(paths),
        Command::Config { cmd } => cmd_config::run(cmd, &paths),
        Command::Url { cmd } => cmd_url::run(cmd, &paths),
    }
}
