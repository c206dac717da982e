//! mobscan: mobile app security scanning from the command line.
//!
//! Uploads an APK to a MobSF-style service, waits for the analysis and
//! renders the report.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use mobscan::{
    cli::{self, exit_codes},
    config::{file::CONFIG_FILE_NAMES, AppConfig, RemediationRuleConfig, Validatable},
    remediation::Advisor,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mobscan")]
#[command(version)]
#[command(about = "Scan mobile app packages and render security reports", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    2  High-severity findings present (with --fail-on-high)
    3  Error occurred

EXAMPLES:
    # Upload, scan and browse the report
    mobscan scan app.apk

    # CI check against a remote service
    mobscan --url https://mobsf.example.com scan app.apk -o summary --fail-on-high

    # Re-render a stored scan as Markdown
    mobscan report 3f2c0d1e9a... -o markdown -O report.md

    # Render a report JSON saved earlier
    mobscan render report.json -o json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the scanning service
    #[arg(long, global = true, env = "MOBSCAN_URL")]
    url: Option<String>,

    /// API key for the scanning service
    #[arg(long, global = true, env = "MOBSCAN_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Output options shared by the report-producing commands
#[derive(Args, Clone)]
struct OutputArgs {
    /// Output format (auto detects TTY: tui if interactive, summary otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 2 if high-severity findings are present
    #[arg(long)]
    fail_on_high: bool,

    /// Extra remediation rule as PATTERN=FIX; may be repeated
    #[arg(long = "fix", value_name = "PATTERN=FIX", value_parser = parse_rule)]
    fixes: Vec<RemediationRuleConfig>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a package, run the analysis and render the report
    #[cfg(feature = "remote")]
    Scan {
        /// APK (or other package) to upload
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        /// Log polling interval (e.g. "5s", "500ms")
        #[arg(long)]
        poll_interval: Option<String>,

        /// Give up after this many polls (0 = unlimited)
        #[arg(long)]
        max_poll_attempts: Option<u32>,
    },

    /// Render the report of a previously completed scan
    #[cfg(feature = "remote")]
    Report {
        /// Scan identity (MD5 hash)
        hash: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List recent scans on the service
    #[cfg(feature = "remote")]
    Scans {
        /// Result page
        #[arg(long, default_value = "1")]
        page: u32,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Download the PDF report of a scan
    #[cfg(feature = "remote")]
    Pdf {
        /// Scan identity (MD5 hash)
        hash: String,

        /// Destination file or directory (current directory if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Show the crucial-findings summary of a scan
    #[cfg(feature = "remote")]
    Crucial {
        /// Scan identity (MD5 hash)
        hash: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Render a report JSON file without contacting the service
    Render {
        /// Report JSON as returned by the service
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .mobscan.yaml in the current directory
    Init,
}

fn parse_rule(s: &str) -> Result<RemediationRuleConfig, String> {
    let (pattern, fix) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PATTERN=FIX, got '{s}'"))?;
    if pattern.trim().is_empty() || fix.trim().is_empty() {
        return Err("pattern and fix must both be non-empty".to_string());
    }
    Ok(RemediationRuleConfig {
        name: None,
        pattern: pattern.trim().to_string(),
        fix: fix.trim().to_string(),
    })
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match &cli.command {
        #[cfg(feature = "remote")]
        Commands::Scan {
            file,
            output,
            poll_interval,
            max_poll_attempts,
        } => {
            let mut config = load_config(&cli, Some(output))?;
            if let Some(interval) = poll_interval {
                config.polling.interval.clone_from(interval);
            }
            if let Some(attempts) = max_poll_attempts {
                config.polling.max_attempts = *attempts;
            }
            let advisor = prepare(&config)?;
            cli::run_scan(&config, &advisor, file, cli.quiet)
        }

        #[cfg(feature = "remote")]
        Commands::Report { hash, output } => {
            let config = load_config(&cli, Some(output))?;
            let advisor = prepare(&config)?;
            cli::run_report(&config, &advisor, hash, cli.quiet)
        }

        #[cfg(feature = "remote")]
        Commands::Scans { page, json } => {
            let config = load_config(&cli, None)?;
            prepare(&config)?;
            cli::run_scans(&config, *page, *json)
        }

        #[cfg(feature = "remote")]
        Commands::Pdf { hash, output_file } => {
            let config = load_config(&cli, None)?;
            prepare(&config)?;
            cli::run_pdf(&config, hash, output_file.clone(), cli.quiet)
        }

        #[cfg(feature = "remote")]
        Commands::Crucial { hash, json } => {
            let config = load_config(&cli, None)?;
            prepare(&config)?;
            cli::run_crucial(&config, hash, *json)
        }

        Commands::Render { file, output } => {
            let config = load_config(&cli, Some(output))?;
            let advisor = prepare(&config)?;
            cli::run_render(&config, &advisor, file, cli.quiet)
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "mobscan", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = mobscan::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            run_config_action(action, &cli)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// File config merged with global flags and, if given, output flags.
fn load_config(cli: &Cli, output: Option<&OutputArgs>) -> Result<AppConfig> {
    let mut builder = AppConfig::builder()
        .api_key(cli.api_key.clone())
        .no_color(cli.no_color);
    if let Some(url) = &cli.url {
        builder = builder.base_url(url.clone());
    }
    if let Some(output) = output {
        builder = builder
            .output_format(output.output)
            .output_file(output.output_file.clone())
            .fail_on_high(output.fail_on_high);
        for rule in &output.fixes {
            builder = builder.remediation_rule(rule.clone());
        }
    }

    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &builder.build());
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    Ok(config)
}

/// Validate the merged config and build the remediation advisor.
fn prepare(config: &AppConfig) -> Result<Advisor> {
    let errors = config.validate();
    if !errors.is_empty() {
        let list: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", list.join("\n  "));
    }
    Advisor::with_rules(&config.remediation.rules).context("invalid remediation rules")
}

fn run_config_action(action: &ConfigAction, cli: &Cli) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = mobscan::config::load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                dirs::config_dir().map(|p| p.join("mobscan").display().to_string()),
                dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match mobscan::config::discover_config_file(cli.config.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".mobscan.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = mobscan::config::generate_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}
