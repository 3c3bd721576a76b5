//! scrawl CLI
//!
//! Main entry point for the `scrawl` command.

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use scrawl::ast::Program;
use scrawl::interp::{Environment, Value};
use scrawl::lexer::TokenKind;

#[derive(Parser)]
#[command(name = "scrawl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A small scripting language with load and exec", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program file
    Run {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Run a program given on the command line
    Exec {
        /// Program text
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Start the interactive REPL
    Repl {
        /// File to load and save line history
        #[arg(long, value_name = "FILE")]
        history: Option<PathBuf>,
    },

    /// Print the token stream of a file
    Tokens {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the AST of a file
    Ast {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the tree as program text instead of JSON
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run { input }) => run(&input),
        Some(Commands::Exec { code }) => exec(&code),
        Some(Commands::Repl { history }) => scrawl::repl::run(history.as_deref()),
        None => scrawl::repl::run(None),
        Some(Commands::Tokens { input }) => tokens(&input),
        Some(Commands::Ast { input, pretty }) => ast(&input, pretty),
    }
}

fn read_source(input: &Path) -> Result<String> {
    std::fs::read_to_string(input)
        .map_err(|e| miette::miette!("Failed to read input file {}: {}", input.display(), e))
}

fn print_result(result: Value) {
    // Only print non-nil results
    if !result.is_nil() {
        println!("{}", result);
    }
}

fn run(input: &Path) -> Result<()> {
    tracing::info!("Running {:?}", input);

    let source = read_source(input)?;
    let mut env = Environment::new();
    let result = scrawl::interpret(&source, &mut env)?;
    print_result(result);
    Ok(())
}

fn exec(code: &str) -> Result<()> {
    tracing::debug!("Executing {} bytes from the command line", code.len());

    let mut env = Environment::new();
    let result = scrawl::interpret(code, &mut env)?;
    print_result(result);
    Ok(())
}

fn tokens(input: &Path) -> Result<()> {
    let source = read_source(input)?;
    let tokens = scrawl::lexer::lex(&source)?;
    tracing::debug!("Lexed {} tokens", tokens.len());

    for token in &tokens {
        println!(
            "{:>4}  {:<9} {:<10} {}",
            token.line,
            category(token.kind),
            format!("{:?}", token.kind),
            token
        );
    }
    Ok(())
}

fn category(kind: TokenKind) -> &'static str {
    if kind.is_keyword() && !kind.is_literal() {
        "keyword"
    } else if kind.is_literal() {
        "literal"
    } else if kind.is_operator() {
        "operator"
    } else {
        "punct"
    }
}

fn ast(input: &Path, pretty: bool) -> Result<()> {
    let source = read_source(input)?;
    let ast = scrawl::parse(&source)?;

    if pretty {
        print!("{}", Program(&ast));
    } else {
        let json = serde_json::to_string_pretty(&ast).into_diagnostic()?;
        println!("{}", json);
    }
    Ok(())
}
