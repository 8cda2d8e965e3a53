// cminus: C- front end (lexer and recursive descent parser)

use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser as ClapParser;
use crossterm::style::Stylize;
use thiserror::Error;

use cminus::parser::lexer::{LexError, Lexer};
use cminus::parser::{printer, ParseError, Parser};

#[derive(Debug, ClapParser)]
#[command(
    name = "cminus",
    version,
    about = "Lexer and parser for the C- teaching language"
)]
struct Args {
    /// C- source file (must have a .c extension)
    file: PathBuf,

    /// Echo every token as it is recognised
    #[arg(short = 'l', long = "lexer", visible_short_alias = 'L')]
    verbose_lexer: bool,

    /// Print the syntax tree after a successful parse
    #[arg(short = 'p', long = "parser", visible_short_alias = 'P')]
    verbose_parser: bool,

    /// Tokenise the whole file and stop
    #[arg(long)]
    lexer_only: bool,

    /// Build the syntax tree and stop without a summary
    #[arg(long)]
    parser_only: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("'{}' is not a C- source file (expected a .c extension)", .0.display())]
    NotCSource(PathBuf),

    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let source = read_source(&args.file)?;

    // --parser-only wins when both stop flags are given
    if args.lexer_only && !args.parser_only {
        return lex_only(&source, args.verbose_lexer);
    }

    let lexer = Lexer::new(&source).echo(args.verbose_lexer);
    let mut parser = Parser::with_lexer(lexer)?;
    let program = parser.parse_program()?;

    if args.verbose_parser {
        print!("{}", printer::render(&program));
    }

    if !args.parser_only {
        println!(
            "{}: {} declaration(s), {} node(s)",
            args.file.display(),
            program.declarations.len(),
            parser.nodes_built()
        );
    }

    Ok(())
}

fn read_source(path: &Path) -> Result<String, CliError> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("c") {
        return Err(CliError::NotCSource(path.to_path_buf()));
    }

    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Run the lexer over the whole input without parsing
fn lex_only(source: &str, echo: bool) -> Result<(), CliError> {
    let tokens = Lexer::new(source).echo(echo).tokenize()?;
    log::info!("{} token(s)", tokens.len());
    Ok(())
}

fn report(err: &CliError) {
    let message = format!("error: {err}");
    if io::stderr().is_terminal() {
        eprintln!("{}", message.red());
    } else {
        eprintln!("{message}");
    }
}
