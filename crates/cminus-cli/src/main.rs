//! C-Minus front end CLI

use clap::{Args, Parser, Subcommand};
use cminus_error::{DiagnosticRenderer, SourceFile, ToDiagnostic};
use cminus_lexer::Lexer;
use cminus_parser::{parse_source_with, Program, ParserConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "cminus")]
#[command(author = "Guilherme Mendes")]
#[command(version = "0.1.0")]
#[command(about = "C-Minus scanner and parser", long_about = None)]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shows file tokens
    Lex {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Shows file AST
    Parse(ParseArgs),

    /// Checks the file for syntax errors
    Check(ParseArgs),
}

#[derive(Args)]
struct ParseArgs {
    /// Input file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Accept function declarations with no name, such as `int (void) { }`
    #[arg(long)]
    allow_anonymous_functions: bool,
}

impl ParseArgs {
    fn config(&self) -> ParserConfig {
        ParserConfig {
            allow_anonymous_functions: self.allow_anonymous_functions,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Reads the input file, exiting on failure
fn read_source(input: &Path) -> SourceFile {
    match fs::read_to_string(input) {
        Ok(source) => {
            tracing::info!(file = %input.display(), bytes = source.len(), "read source");
            SourceFile::new(input.display().to_string(), source)
        }
        Err(e) => {
            eprintln!("error reading {}: {}", input.display(), e);
            process::exit(1);
        }
    }
}

/// Renders the error against the file and exits
fn fail(file: &SourceFile, error: &impl ToDiagnostic) -> ! {
    let renderer = DiagnosticRenderer::new(file);
    eprintln!("{}", renderer.render(&error.to_diagnostic()));
    process::exit(1);
}

fn parse_file(args: &ParseArgs) -> (SourceFile, Program) {
    let file = read_source(&args.input);
    match parse_source_with(&file.source, args.config()) {
        Ok(program) => (file, program),
        Err(e) => fail(&file, &e),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Lex { input } => {
            let file = read_source(&input);
            let mut lexer = Lexer::new(&file.source);

            loop {
                match lexer.next_token() {
                    Ok(token) => {
                        println!("Line {}: {} '{}'", token.line(), token.kind.name(), token.lexeme);
                        if token.is_eof() {
                            break;
                        }
                    }
                    Err(e) => fail(&file, &e),
                }
            }
        }

        Commands::Parse(args) => {
            let (_, program) = parse_file(&args);
            print!("{}", program);
        }

        Commands::Check(args) => {
            let (file, program) = parse_file(&args);
            tracing::info!(file = %file.name, "no syntax errors");
            println!("ok: {} declarations", program.declarations.len());
        }
    }
}
