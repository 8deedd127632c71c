use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use aql_lang::SuggestionKind;
use aql_lang::cli::{
    self, BuildOptions, CliError, PickOptions, SuggestOptions, TokenizeOptions, ValidateOptions,
    ValidateResult,
};
use aql_lang::output;
use aql_lang::rebuild::ItemClick;
use clap::{Parser as ClapParser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(ClapParser)]
#[command(name = "aql")]
#[command(about = "AQL - tokenize, validate and autocomplete API Query Language filters")]
#[command(version)]
struct Cli {
    /// Default log filter when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a query as JSON
    Tokenize {
        /// The query (reads from stdin if not provided)
        input: Option<String>,

        /// Keep grammar slots that matched no text
        #[arg(long)]
        all: bool,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Check that every field in a query is known
    Validate {
        /// The query (reads from stdin if not provided)
        input: Option<String>,

        /// Catalog file with the known fields
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Additional known field (repeatable)
        #[arg(short, long = "field")]
        fields: Vec<String>,
    },

    /// Print the suggestions for a query as JSON
    Suggest {
        /// The query (reads from stdin if not provided)
        input: Option<String>,

        /// Catalog file with fields and values
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Apply a suggestion to a query and print the new query
    Pick {
        /// The query
        input: String,

        /// Label of the suggestion to apply
        label: String,

        /// Catalog file with fields and values
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Suggestion kind, when the label is ambiguous
        #[arg(short, long, value_parser = parse_kind)]
        kind: Option<SuggestionKind>,
    },

    /// Print the output handed to the search action
    Build {
        /// The query (reads from stdin if not provided)
        input: Option<String>,

        /// Query prepended to the input
        #[arg(short, long)]
        implicit_query: Option<String>,

        /// Catalog file, for its implicit query
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'aql docs' to list categories)
        category: String,
    },
}

fn parse_kind(s: &str) -> Result<SuggestionKind, String> {
    SuggestionKind::from_name(s).ok_or_else(|| format!("unknown suggestion kind '{s}'"))
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let runtime = match tokio::runtime::Builder::new_current_thread().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}", CliError::Io(e));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli.command)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<ExitCode, CliError> {
    match command {
        Commands::Tokenize { input, all, pretty } => {
            let options = TokenizeOptions {
                input: read_input(input)?,
                all,
                pretty,
            };
            println!("{}", cli::execute_tokenize(&options)?);
        }
        Commands::Validate {
            input,
            catalog,
            fields,
        } => {
            let options = ValidateOptions {
                input: read_input(input)?,
                catalog,
                fields,
            };
            match cli::execute_validate(&options)? {
                ValidateResult::Valid => println!("Query is valid"),
                ValidateResult::Invalid(errors) => {
                    for e in errors {
                        println!("{}", e);
                    }
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Suggest {
            input,
            catalog,
            pretty,
        } => {
            let options = SuggestOptions {
                input: read_input(input)?,
                catalog,
            };
            let suggestions = cli::execute_suggest(&options).await?;
            println!("{}", to_json(&suggestions, pretty)?);
        }
        Commands::Pick {
            input,
            label,
            catalog,
            kind,
        } => {
            let options = PickOptions {
                input,
                catalog,
                label,
                kind,
            };
            match cli::execute_pick(&options).await? {
                ItemClick::SetInput(input) => println!("{}", input),
                ItemClick::Search(output) => println!("{}", to_json(&output, false)?),
            }
        }
        Commands::Build {
            input,
            implicit_query,
            catalog,
            pretty,
        } => {
            let options = BuildOptions {
                input: read_input(input)?,
                implicit_query,
                catalog,
            };
            println!("{}", to_json(&cli::execute_build(&options)?, pretty)?);
        }
        Commands::Docs => print!("{}", cli::get_docs_overview()),
        Commands::Doc { category } => print!("{}", cli::get_doc_category(&category)?),
    }
    Ok(ExitCode::SUCCESS)
}

fn read_input(input: Option<String>) -> Result<String, CliError> {
    match input {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            debug!(bytes = buffer.len(), "read query from stdin");
            Ok(buffer.trim_end_matches(['\n', '\r']).to_string())
        }
        None => Err(CliError::NoInput),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        output::to_json_pretty(value)
    } else {
        output::to_json(value)
    }
}
