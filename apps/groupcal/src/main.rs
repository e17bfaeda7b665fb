use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mimalloc::MiMalloc;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use group_calendar::config::GroupCalendarConfig;
use group_calendar::contract::{
    AvailabilityUpdate, CallerCtx, OverlapMode, TimeRangeInput, Weekday,
};
use group_calendar::GroupCalendar;
use runtime::{AppConfig, CliArgs};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Groupcal - group availability and calendar tooling
#[derive(Parser)]
#[command(name = "groupcal")]
#[command(about = "Groupcal - group availability overlap and calendar tooling")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the availability overlap of one organization
    Overlap {
        /// JSON array of member availability records
        #[arg(short, long)]
        input: PathBuf,

        /// Organization to report on
        #[arg(long)]
        org: String,

        /// Range compression mode (overrides config)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
    /// Check configuration
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Plateau,
    Legacy,
}

impl From<ModeArg> for OverlapMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Plateau => OverlapMode::Plateau,
            ModeArg::Legacy => OverlapMode::Legacy,
        }
    }
}

/// One member's availability as found in the input file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberAvailability {
    user_id: String,
    #[serde(default)]
    user_email: String,
    organization_id: String,
    #[serde(default)]
    time_ranges: BTreeMap<Weekday, Vec<TimeRangeInput>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.core.home_dir));
    tracing::info!("groupcal starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Overlap { input, org, mode } => run_overlap(&config, &input, &org, mode).await,
        Commands::Check => check_config(&config),
    }
}

async fn run_overlap(
    config: &AppConfig,
    input: &Path,
    org: &str,
    mode: Option<ModeArg>,
) -> Result<()> {
    let mut module_cfg: GroupCalendarConfig = config.module_config(GroupCalendar::NAME)?;
    if let Some(mode) = mode {
        module_cfg.overlap_mode = mode.into();
    }

    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let members: Vec<MemberAvailability> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid availability JSON in {}", input.display()))?;
    tracing::debug!("Loaded {} availability records", members.len());

    let calendar = GroupCalendar::init(&module_cfg);
    let api = calendar.client();

    for member in members {
        let ctx = CallerCtx::new(member.user_id, member.user_email, member.organization_id);
        let update = AvailabilityUpdate {
            time_ranges: member.time_ranges,
        };
        api.update_availability(&ctx, update)
            .await
            .with_context(|| format!("availability of '{}' rejected", ctx.user_id))?;
    }

    let viewer = CallerCtx::new("groupcal-cli", "", org);
    let overlap = api.calculate_overlap(&viewer).await?;
    tracing::info!(org, user_count = overlap.user_count, "Overlap computed");

    println!("{}", serde_json::to_string_pretty(&overlap)?);
    Ok(())
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let module_cfg: GroupCalendarConfig = config.module_config(GroupCalendar::NAME)?;
    tracing::debug!(?module_cfg, "group_calendar configuration");

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
