use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde_json::Value as JsonValue;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::predicate::{Predicate, RollOptions};

use super::error::CliError;
use super::exit_codes;
use super::output::{
    self, FactSetEntry, ListData, OutputMode, PredicateEntry, TestData, ValidateData,
};

#[derive(Parser)]
#[command(name = "rollpred")]
#[command(about = "Validate and test roll-option predicates")]
#[command(version)]
pub struct Cli {
    /// Path to config file (overrides ROLLPRED_CONFIG env var and default location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (auto-enabled when stdout is piped)
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Force text output even when stdout is piped
    #[arg(long, global = true, conflicts_with = "json")]
    pub no_json: bool,

    /// Suppress all output on success (errors still go to stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Test a predicate against a set of roll options (exit 0 if it holds, 1 if not)
    Test {
        /// Predicate as inline JSON5 (a statement or a list of statements), or @name from config
        predicate: String,

        /// Roll option present during the test (repeatable)
        #[arg(short = 'f', long = "fact", action = clap::ArgAction::Append)]
        facts: Vec<String>,

        /// Include a named fact set from the config file (repeatable)
        #[arg(long = "facts-from", action = clap::ArgAction::Append)]
        facts_from: Vec<String>,

        /// Read roll options from a JSON file holding a list of strings
        #[arg(long)]
        facts_file: Option<PathBuf>,
    },

    /// Validate an inline predicate, or every predicate in the config file
    Validate {
        /// Predicate as inline JSON5; omit to verify the config file
        predicate: Option<String>,
    },

    /// List named predicates and fact sets from the config file
    List,

    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

pub fn execute(cli: Cli, output_mode: OutputMode) -> Result<i32, CliError> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Test {
            predicate,
            facts,
            facts_from,
            facts_file,
        } => {
            let config = config::load_with_override(config_path).map_err(CliError::Config)?;
            let predicate = resolve_predicate(&predicate, &config)?;

            let mut options = config.base_facts();
            options.extend(facts);
            for name in &facts_from {
                let set = config
                    .fact_set(name)
                    .ok_or_else(|| unknown_name("fact set", name, config.facts.keys()))?;
                options.extend(set.sorted());
            }
            if let Some(path) = facts_file {
                options.extend(read_facts_file(&path)?.sorted());
            }

            let satisfied = predicate.test(&options);
            tracing::debug!(%predicate, satisfied, facts = options.len(), "tested predicate");

            let shown_facts = config
                .settings
                .show_facts
                .then(|| options.sorted().into_iter().map(String::from).collect::<Vec<_>>());

            match output_mode {
                OutputMode::Json => output::print_json(&TestData {
                    predicate: predicate.to_string(),
                    satisfied,
                    facts: shown_facts,
                }),
                OutputMode::Text => {
                    if satisfied {
                        println!("✓ holds: {}", predicate);
                    } else {
                        println!("✗ does not hold: {}", predicate);
                    }
                    if let Some(shown) = shown_facts {
                        println!("  facts: {}", shown.join(", "));
                    }
                }
                OutputMode::Quiet => {}
            }

            Ok(if satisfied {
                exit_codes::SUCCESS
            } else {
                exit_codes::NOT_SATISFIED
            })
        }

        Commands::Validate {
            predicate: Some(raw),
        } => {
            let predicate = Predicate::from_json(&parse_inline(&raw)?)?;

            match output_mode {
                OutputMode::Json => output::print_json(&ValidateData {
                    source: "inline".to_string(),
                    valid: true,
                    statements: Some(predicate.len()),
                    errors: Vec::new(),
                }),
                OutputMode::Text => println!("✓ Predicate is valid: {}", predicate),
                OutputMode::Quiet => {}
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Validate { predicate: None } => {
            let Some(path) =
                config::existing_config_path(config_path).map_err(CliError::Config)?
            else {
                match output_mode {
                    OutputMode::Json => output::print_json(&ValidateData {
                        source: "defaults".to_string(),
                        valid: true,
                        statements: None,
                        errors: Vec::new(),
                    }),
                    OutputMode::Text => println!("✓ No config file, using defaults"),
                    OutputMode::Quiet => {}
                }
                return Ok(exit_codes::SUCCESS);
            };
            let errors = config::verify(&path).map_err(CliError::Config)?;

            if !errors.is_empty() {
                return Err(CliError::ConfigInvalid { path, errors });
            }

            match output_mode {
                OutputMode::Json => output::print_json(&ValidateData {
                    source: path.display().to_string(),
                    valid: true,
                    statements: None,
                    errors: Vec::new(),
                }),
                OutputMode::Text => println!("✓ Configuration is valid: {}", path.display()),
                OutputMode::Quiet => {}
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::List => {
            let config = config::load_with_override(config_path).map_err(CliError::Config)?;
            let data = list_data(&config);

            if output_mode.is_json() {
                output::print_json(&data);
            } else if !output_mode.is_quiet() {
                print_list(&data);
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "rollpred", &mut std::io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// `@name` looks up a named predicate, anything else is inline JSON5
fn resolve_predicate(arg: &str, config: &Config) -> Result<Predicate, CliError> {
    if let Some(name) = arg.strip_prefix('@') {
        let predicate = config
            .predicate(name)
            .ok_or_else(|| unknown_name("predicate", name, config.predicates.keys()))??;
        return Ok(predicate);
    }

    Ok(Predicate::from_json(&parse_inline(arg)?)?)
}

fn parse_inline(raw: &str) -> Result<JsonValue, CliError> {
    json5::from_str(raw).map_err(|e| {
        CliError::InvalidArgs(format!(
            "predicate is not valid JSON5 ({}); quote bare roll options, e.g. '\"{}\"'",
            e, raw
        ))
    })
}

fn read_facts_file(path: &Path) -> Result<RollOptions, CliError> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read facts file: {}", path.display()))
        .map_err(CliError::Other)?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse facts file: {}", path.display()))
        .map_err(CliError::Other)
}

/// error for an unknown config entry, suggesting close matches
fn unknown_name<'a>(
    kind: &str,
    name: &str,
    known: impl Iterator<Item = &'a String>,
) -> CliError {
    let suggestions: Vec<&str> = known
        .filter(|candidate| strsim::levenshtein(name, candidate) <= 2)
        .map(String::as_str)
        .collect();

    if suggestions.is_empty() {
        CliError::InvalidArgs(format!("unknown {} '{}'", kind, name))
    } else {
        CliError::InvalidArgs(format!(
            "unknown {} '{}', did you mean: {}?",
            kind,
            name,
            suggestions.join(", ")
        ))
    }
}

fn list_data(config: &Config) -> ListData {
    let predicates = config
        .predicates
        .keys()
        .map(|name| {
            let (predicate, error) = match config.predicate(name) {
                Some(Ok(p)) => (Some(p.to_string()), None),
                Some(Err(e)) => (None, Some(e.to_string())),
                None => (None, None),
            };
            PredicateEntry {
                name: name.clone(),
                predicate,
                error,
            }
        })
        .collect();

    let facts = config
        .facts
        .iter()
        .map(|(name, options)| FactSetEntry {
            name: name.clone(),
            options: options.clone(),
        })
        .collect();

    ListData { predicates, facts }
}

fn print_list(data: &ListData) {
    let width = data
        .predicates
        .iter()
        .map(|p| p.name.len())
        .chain(data.facts.iter().map(|f| f.name.len()))
        .max()
        .unwrap_or(0);

    println!("Predicates:");
    if data.predicates.is_empty() {
        println!("  (none)");
    }
    for entry in &data.predicates {
        match (&entry.predicate, &entry.error) {
            (Some(p), _) => println!("  {:<width$}  {}", entry.name, p, width = width),
            (None, Some(e)) => println!("  {:<width$}  ✗ {}", entry.name, e, width = width),
            (None, None) => println!("  {}", entry.name),
        }
    }

    println!();
    println!("Fact sets:");
    if data.facts.is_empty() {
        println!("  (none)");
    }
    for entry in &data.facts {
        println!(
            "  {:<width$}  {}",
            entry.name,
            entry.options.join(", "),
            width = width
        );
    }
}
