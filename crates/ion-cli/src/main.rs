mod report;

use std::io::Read;
use std::path::Path;

use clap::{Parser, Subcommand, ValueEnum};
use ion_parser::{ParserOptions, PositionMode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use report::Reporter;

#[derive(Parser)]
#[command(name = "ion")]
#[command(about = "Ion front end: parse expressions and report syntax errors")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a file and print each top-level expression, fully parenthesised
    Parse {
        /// Input .ion file, or `-` for stdin
        path: String,

        /// Print the tree and diagnostics as JSON
        #[arg(long)]
        json: bool,

        /// Which token a node's position refers to
        #[arg(long, value_enum, default_value_t = Positions::Completion)]
        positions: Positions,
    },

    /// Check a file for syntax errors without printing the tree
    Check {
        /// Input .ion file, or `-` for stdin
        path: String,
    },

    /// Dump the token stream
    Tokens {
        /// Input .ion file, or `-` for stdin
        path: String,

        /// Print the tokens as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Positions {
    /// Last token of each construct
    Completion,
    /// First token of each construct
    Start,
}

impl From<Positions> for PositionMode {
    fn from(positions: Positions) -> Self {
        match positions {
            Positions::Completion => PositionMode::Completion,
            Positions::Start => PositionMode::Start,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Command::Parse {
            path,
            json,
            positions,
        } => cmd_parse(&path, json, positions.into()),
        Command::Check { path } => cmd_check(&path),
        Command::Tokens { path, json } => cmd_tokens(&path, json),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn read_source(path: &str) -> String {
    if path == "-" {
        let mut source = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut source) {
            eprintln!("Error reading stdin: {e}");
            std::process::exit(1);
        }
        return source;
    }

    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn display_name(path: &str) -> &str {
    if path == "-" {
        "<stdin>"
    } else {
        path
    }
}

fn parse_or_exit(path: &str, source: &str, options: ParserOptions) -> ion_parser::ParseOutput {
    match ion_parser::Parser::parse_with(source, options) {
        Ok(output) => output,
        Err(e) => {
            eprint!("{}", Reporter::new(display_name(path), source).parse_error(&e));
            std::process::exit(1);
        }
    }
}

fn report_diagnostics(path: &str, source: &str, output: &ion_parser::ParseOutput) {
    let reporter = Reporter::new(display_name(path), source);
    for diagnostic in &output.diagnostics {
        eprint!("{}", reporter.diagnostic(diagnostic));
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error serializing output: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_parse(path: &str, json: bool, positions: PositionMode) {
    let source = read_source(path);
    let options = ParserOptions::default().with_positions(positions);
    let output = parse_or_exit(path, &source, options);

    if json {
        print_json(&output);
        return;
    }

    for expr in &output.program.body {
        println!("{}", ion_parser::printer::to_source(expr));
    }
    report_diagnostics(path, &source, &output);
}

fn cmd_check(path: &str) {
    let source = read_source(path);
    let output = parse_or_exit(path, &source, ParserOptions::default());

    if output.has_errors() {
        report_diagnostics(path, &source, &output);
        eprintln!(
            "{}: {} error(s)",
            display_name(path),
            output.diagnostics.len()
        );
        std::process::exit(1);
    }

    eprintln!("OK: {}", display_name(path));
}

fn cmd_tokens(path: &str, json: bool) {
    let source = read_source(path);

    let tokens = match ion_lexer::Scanner::tokenize(&source) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("Lexer error: {e}");
            std::process::exit(1);
        }
    };

    if json {
        print_json(&tokens);
        return;
    }

    for token in &tokens {
        println!("{token}");
    }
}
