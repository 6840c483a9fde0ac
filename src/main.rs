//! exprpad CLI - expression playground core.

use clap::{Parser, Subcommand};
use exprpad::cli;
use std::path::PathBuf;
use std::process::ExitCode;

/// Get the version string.
///
/// - Release builds (on a git tag): "0.1.0"
/// - Development builds: "0.1.0-dev (abc1234)"
/// - Dirty working directory: "0.1.0-dev (abc1234-dirty)"
fn version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("EXPRPAD_GIT_HASH");
    const IS_RELEASE: &str = env!("EXPRPAD_IS_RELEASE");

    // Use a static to avoid repeated allocations
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            VERSION.to_string()
        } else {
            format!("{VERSION}-dev ({GIT_HASH})")
        }
    })
}

#[derive(Parser)]
#[command(name = "exprpad")]
#[command(author, version = version(), about = "Playground for evaluating expressions against JSON contexts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression against a JSON context.
    Eval {
        /// Expression text. Defaults to the auto-saved draft, then the
        /// default example.
        expression: Option<String>,

        /// File holding the JSON context.
        #[arg(short, long)]
        context: Option<PathBuf>,

        /// Evaluate a built-in example by index (see `exprpad examples`).
        #[arg(long)]
        example: Option<usize>,

        /// Evaluator endpoint base URL (overrides config).
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Resolve the accessor path at a byte offset in a JSON document.
    Path {
        /// File holding the JSON document.
        file: PathBuf,

        /// Zero-based byte offset into the document.
        offset: usize,
    },

    /// List recently updated saved sessions.
    List {
        /// Maximum number of sessions to show. Defaults to 5.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Save a session. Without --expression, names the auto-saved draft.
    Save {
        /// Session name.
        name: String,

        /// Expression text.
        #[arg(short, long)]
        expression: Option<String>,

        /// File holding the JSON context.
        #[arg(short, long)]
        context: Option<PathBuf>,

        /// Optional description.
        #[arg(short, long)]
        description: Option<String>,

        /// Tags (repeatable).
        #[arg(short, long)]
        tag: Vec<String>,
    },

    /// Show a saved session as JSON.
    Show {
        /// Session ID.
        id: String,
    },

    /// Delete a saved session.
    Delete {
        /// Session ID.
        id: String,
    },

    /// Remove saved sessions untouched for too long.
    Clean {
        /// Duration (e.g., "7d", "30d", "24h"). Defaults to the
        /// configured retention.
        #[arg(long)]
        before: Option<String>,

        /// Remove all sessions.
        #[arg(long)]
        all: bool,
    },

    /// List the built-in example sessions.
    Examples,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval {
            expression,
            context,
            example,
            endpoint,
        } => cli::eval::run(
            expression.as_deref(),
            context.as_deref(),
            example,
            endpoint.as_deref(),
        ),
        Commands::Path { file, offset } => cli::path::run(&file, offset),
        Commands::List { limit } => cli::list::run(limit),
        Commands::Save {
            name,
            expression,
            context,
            description,
            tag,
        } => cli::save::run(
            &name,
            expression.as_deref(),
            context.as_deref(),
            description.as_deref(),
            &tag,
        ),
        Commands::Show { id } => cli::show::run(&id),
        Commands::Delete { id } => cli::delete::run(&id),
        Commands::Clean { before, all } => cli::clean::run(before.as_deref(), all),
        Commands::Examples => cli::examples::run(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("exprpad: error: {e}");
            ExitCode::FAILURE
        }
    }
}
