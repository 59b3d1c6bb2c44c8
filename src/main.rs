//! Plorth CLI

use clap::{Parser, Subcommand};
use plorth::error::report_error;
use plorth::runtime::Runtime;
use plorth::value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plorth", version, about = "Plorth - a stack-based scripting language")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Compile and execute a Plorth source file
    Run {
        /// Source file to execute
        file: PathBuf,
    },
    /// Start an interactive session
    Repl,
    /// Tokenize and dump the token stream (debug)
    Tokens {
        /// Source file to tokenize
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Run { file }) => run_file(&file),
        Some(Command::Tokens { file }) => tokenize_file(&file),
        Some(Command::Repl) | None => repl(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_file(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let filename = path.display().to_string();

    let runtime = Runtime::new();
    let mut ctx = runtime.new_context();

    ctx.set_filename(&filename);

    // Syntax errors render through ariadne; runtime errors print with
    // their position prefix.
    let quote = match plorth::compiler::compile(&source) {
        Ok(quote) => quote,
        Err(error) => {
            report_error(&filename, &source, &error);
            std::process::exit(1);
        }
    };

    if !ctx.call(&quote) {
        if let Some(error) = ctx.error() {
            eprintln!("{}", error.display_with_filename(Some(&filename)));
        }
        std::process::exit(1);
    }

    for value in ctx.data() {
        println!("{}", value::to_source(value));
    }

    Ok(())
}

fn tokenize_file(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let filename = path.display().to_string();

    match plorth::lexer::tokenize(&source) {
        Ok(tokens) => println!("{}", serde_json::to_string_pretty(&tokens)?),
        Err(error) => {
            report_error(&filename, &source, &error);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn repl() -> Result<(), Box<dyn std::error::Error>> {
    let mut repl = plorth::repl::Repl::new()?;

    repl.run()?;
    Ok(())
}
