use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use matlang::{check_source, display_error, parse_source, run_source};
use tracing_subscriber::EnvFilter;

/// Interpreter for a small matrix language
#[derive(Parser)]
#[command(name = "matlang")]
#[command(version)]
#[command(about = "Run matrix programs", long_about = None)]
struct Cli {
    /// Path to the source file to run
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Stop after static checking, without running the program
    #[arg(long)]
    check: bool,

    /// Print the parsed program tree and exit
    #[arg(long)]
    dump_ast: bool,
}

fn main() -> ExitCode {
    // Initialize tracing if MATLANG_LOG is set
    if let Ok(filter) = EnvFilter::try_from_env("MATLANG_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_writer(io::stderr)
            .init();
        tracing::debug!("tracing initialized");
    }

    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: failed to read {}: {}", cli.file.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let result = if cli.dump_ast {
        parse_source(&source)
            .map(|program| println!("{:#?}", program))
            .map_err(|error| vec![error])
    } else if cli.check {
        check_source(&source).map(|_| ())
    } else {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let result = run_source(&source, &mut out);
        let _ = out.flush();
        result
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(errors) => {
            tracing::debug!(errors = errors.len(), "run failed");
            for error in &errors {
                display_error(error, &source, &cli.file);
            }
            ExitCode::FAILURE
        }
    }
}
