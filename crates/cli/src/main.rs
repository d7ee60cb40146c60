mod check;
mod run;
mod tokens;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Objax language front-end.
#[derive(Parser)]
#[command(name = "objax", version, about = "Objax language front-end")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute an Objax source file and print the extracted classes
    Run {
        /// Path to the source file, or '-' to read stdin
        file: PathBuf,
        /// Stop after this many diagnostics per stage
        #[arg(long)]
        max_errors: Option<usize>,
    },

    /// Report every lexical and syntax error in a source file
    Check {
        /// Path to the source file, or '-' to read stdin
        file: PathBuf,
        /// Stop after this many diagnostics per stage
        #[arg(long)]
        max_errors: Option<usize>,
    },

    /// Print the token stream of a source file
    Tokens {
        /// Path to the source file, or '-' to read stdin
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { file, max_errors } => {
            run::cmd_run(&file, max_errors, cli.output, cli.quiet);
        }
        Commands::Check { file, max_errors } => {
            check::cmd_check(&file, max_errors, cli.output, cli.quiet);
        }
        Commands::Tokens { file } => {
            tokens::cmd_tokens(&file, cli.output, cli.quiet);
        }
    }
}

/// Read source text from `path`, or from stdin when `path` is `-`.
/// Exits the process with status 1 if the source cannot be read.
pub(crate) fn read_source(path: &Path, output: OutputFormat, quiet: bool) -> String {
    let result = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        std::fs::read_to_string(path)
    };
    match result {
        Ok(src) => src,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

pub(crate) fn print_json(value: &impl serde::Serialize) {
    let pretty = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
    println!("{}", pretty);
}
