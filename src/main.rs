use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clientscope::cli::commands::research::{OutputFormat, ResearchOptions};
use clientscope::types::CustomTopic;

#[derive(Parser)]
#[command(name = "clientscope")]
#[command(
    version,
    about = "Prospective client research briefings for banking relationship teams"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(
        long,
        short,
        global = true,
        help = "Config file (replaces global/project lookup)"
    )]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Research a company and print the briefing
    Research {
        #[arg(long, help = "Company to research")]
        company: Option<String>,
        #[arg(long, help = "Industry, used to qualify searches")]
        industry: Option<String>,
        #[arg(long, help = "Company website")]
        website: Option<String>,
        #[arg(long, help = "Include ESG profile")]
        esg: bool,
        #[arg(long, help = "Include peer benchmarking")]
        benchmarking: bool,
        #[arg(long, help = "Include current banking relationships")]
        banking_relationships: bool,
        #[arg(long, help = "Include decision-maker profiling")]
        decision_makers: bool,
        #[arg(
            long = "custom-topic",
            value_name = "NAME|QUERY|DESCRIPTION",
            help = "User-defined topic (repeatable)"
        )]
        custom_topics: Vec<CustomTopic>,
        #[arg(long, help = "JSON request file (flags override its fields)")]
        request: Option<PathBuf>,
        #[arg(long, short, help = "Write the result to this file")]
        output: Option<PathBuf>,
        #[arg(
            short = 'f',
            long,
            default_value = "json",
            help = "Output format: json, text"
        )]
        format: OutputFormat,
    },

    /// Check that the LLM and search providers are reachable
    Check,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json, yaml"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Research {
            company,
            industry,
            website,
            esg,
            benchmarking,
            banking_relationships,
            decision_makers,
            custom_topics,
            request,
            output,
            format,
        } => {
            clientscope::cli::commands::research::run(
                ResearchOptions {
                    request_file: request,
                    company,
                    industry,
                    website,
                    esg,
                    benchmarking,
                    banking_relationships,
                    decision_makers,
                    custom_topics,
                    output,
                    format,
                    quiet: cli.quiet,
                },
                config,
            )?;
        }
        Commands::Check => {
            clientscope::cli::commands::check::run(config)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                clientscope::cli::commands::config::show(config, &format)?;
            }
            ConfigAction::Path => {
                clientscope::cli::commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                if global {
                    clientscope::cli::commands::config::init_global(force)?;
                } else {
                    clientscope::cli::commands::config::init_project(force)?;
                }
            }
        },
    }

    Ok(())
}
