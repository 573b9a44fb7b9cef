use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::analysis::{CompetitorAnalyzer, CountryFilter};
use crate::config::{self, Config, Credentials};
use crate::report;
use crate::session::Session;

#[derive(Parser)]
#[command(name = "insights")]
#[command(about = "Competitor intelligence: find competitors and analyze them with an LLM")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration file (defaults to <config dir>/insights/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write debug logs to a file
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find and analyze competitors for a company
    Analyze {
        /// Company and product description ("-" reads from stdin)
        description: String,

        /// Target country, or "Global" for no restriction
        #[arg(long, default_value = "Global", value_parser = parse_country)]
        country: CountryFilter,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
    },
    /// Write a default configuration file
    Config {
        /// Output path (defaults to the standard config location)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// List supported target countries
    Countries,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Markdown,
    Json,
}

fn parse_country(raw: &str) -> Result<CountryFilter, String> {
    raw.parse().map_err(|e: crate::analysis::types::UnknownCountry| e.to_string())
}

/// Parse arguments and run the selected command
pub async fn run() -> Result<()> {
    execute(Cli::parse()).await
}

async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            description,
            country,
            format,
        } => {
            // Only analysis reads the config file.
            let mut config = match &cli.config {
                Some(path) => config::load_config_from(path)?,
                None => config::load_config()?,
            };
            if cli.debug {
                config.debug = true;
            }
            let _log_guard = crate::logging::init(&config)?;

            analyze(&config, description, country, format).await
        }
        Commands::Config { output, force } => {
            let _log_guard = crate::logging::init(&Config {
                debug: cli.debug,
                ..Config::default()
            })?;

            let path = match output.or(cli.config) {
                Some(path) => path,
                None => config::config_path()?,
            };
            write_default_config(&path, force)
        }
        Commands::Countries => {
            for country in CountryFilter::ALL {
                println!("{country}");
            }
            Ok(())
        }
    }
}

async fn analyze(
    config: &Config,
    description: String,
    country: CountryFilter,
    format: OutputFormat,
) -> Result<()> {
    let description = if description == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read description from stdin")?;
        buf
    } else {
        description
    };

    if description.trim().is_empty() {
        bail!("Please provide your company description.");
    }

    let credentials = Credentials::from_env()?;
    let analyzer = CompetitorAnalyzer::new(&credentials, config)?;

    let mut session = Session::new();
    eprintln!("🔍 Finding and analyzing competitors...");
    session
        .run(&analyzer, &description, country)
        .await
        .context("Error during analysis")?;

    let competitors = session.competitors().unwrap_or_default();
    let Some(outcome) = session.analysis() else {
        bail!("analysis finished without a result");
    };

    match format {
        OutputFormat::Markdown => {
            println!("{}", report::render_report_markdown(competitors, outcome.result()));
        }
        OutputFormat::Json => {
            let rendered = report::render_report_json(competitors, outcome)
                .context("Failed to serialize report")?;
            println!("{rendered}");
        }
    }

    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    config::save_config(&Config::default(), path)?;
    println!("Created default config at: {}", path.display());
    println!(
        "API keys are read from {} and {} (environment or .env).",
        config::credentials::EXA_API_KEY_VAR,
        config::credentials::GOOGLE_API_KEY_VAR
    );
    Ok(())
}
