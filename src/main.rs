use std::path::PathBuf;

use aplite::{
    error::AplError,
    interpreter::session::{Session, SessionConfig},
    load_source,
};
use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// The prompt of the interactive session: six blanks.
const PROMPT: &str = "      ";

/// aplite is an interpreter for an APL-family array language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluates one line and exits.
    #[arg(short, long, conflicts_with = "file")]
    expression: Option<String>,

    /// Runs an `.apl` source file, printing each result.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Initial index origin, 0 or 1.
    #[arg(long)]
    index_origin: Option<f64>,

    /// Initial print precision.
    #[arg(long)]
    print_precision: Option<f64>,

    /// Initial comparison tolerance.
    #[arg(long)]
    comparison_tolerance: Option<f64>,

    /// Log filter, such as `debug` or `aplite=trace`. Overrides `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    let args = Args::parse();

    let filter = args.log_level
                     .as_deref()
                     .map_or_else(|| EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                                  EnvFilter::new);
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();

    let config = SessionConfig { index_origin:         args.index_origin,
                                 print_precision:      args.print_precision,
                                 comparison_tolerance: args.comparison_tolerance, };
    let mut session = Session::with_config(&config).unwrap_or_else(|e| {
                                                       report(&e);
                                                       std::process::exit(1);
                                                   });

    if let Some(line) = args.expression {
        if !run_line(&mut session, &line) {
            std::process::exit(1);
        }
    } else if let Some(path) = args.file {
        let source = load_source(&path).unwrap_or_else(|e| {
                                           report(&e);
                                           std::process::exit(1);
                                       });
        for line in source.lines() {
            run_line(&mut session, line);
        }
    } else {
        repl(&mut session);
    }
}

/// Evaluates one line, printing its results or its error.
///
/// # Returns
/// `true` if the line evaluated without error.
fn run_line(session: &mut Session, line: &str) -> bool {
    match session.execute(line) {
        Ok(outcomes) => {
            for text in outcomes.iter().filter_map(|outcome| session.display(outcome)) {
                println!("{text}");
            }
            true
        },
        Err(e) => {
            report(&e);
            false
        },
    }
}

fn report(error: &AplError) {
    eprintln!("{error}");
    if let Some(caret) = error.caret() {
        eprintln!("{caret}");
    }
}

fn repl(session: &mut Session) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Failed to start the line editor: {e}");
            std::process::exit(1);
        },
    };

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if let Err(e) = editor.add_history_entry(line.as_str()) {
                    warn!(error = %e, "failed to record history");
                }
                run_line(session, &line);
            },
            Err(ReadlineError::Interrupted) => {},
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{e}");
                break;
            },
        }
    }
}
