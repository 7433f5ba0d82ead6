use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use wbi_dashboard::{Client, EntityMap, ReportConfig, build_report, storage};

#[derive(Parser, Debug)]
#[command(
    name = "wbi-dashboard",
    version,
    about = "Build dashboard figures from World Bank indicators"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the indicators and write the four figures as JSON.
    Figures(FiguresArgs),
}

#[derive(Args, Debug)]
struct FiguresArgs {
    /// Countries as Name=CODE pairs separated by comma or semicolon
    /// (e.g., "Canada=CAN;Brazil=BRA"). Defaults to the built-in twelve.
    #[arg(short, long, default_value = "")]
    countries: String,
    /// JSON file with indicator codes, date window and page size.
    #[arg(long)]
    config: Option<PathBuf>,
    /// API base URL.
    #[arg(long, default_value = "https://api.worldbank.org/v2")]
    base_url: String,
    /// Write figures to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also save the fetched observations as CSV.
    #[arg(long)]
    raw: Option<PathBuf>,
    /// Pretty-print the JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Figures(args) => cmd_figures(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ReportConfig> {
    let Some(path) = path else {
        return Ok(ReportConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

fn cmd_figures(args: FiguresArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let entities = EntityMap::parse(&args.countries).context("invalid --countries")?;
    let client = Client::new(args.base_url);

    let report = build_report(&client, entities, &config);
    let failed: Vec<&str> = report
        .slots
        .iter()
        .filter(|s| !s.is_available())
        .map(|s| s.code.as_str())
        .collect();
    if !failed.is_empty() {
        eprintln!("Warning: no data for {}", failed.join(", "));
    }

    if let Some(path) = args.raw.as_ref() {
        storage::save_observations_csv(&report.slots, path)?;
        info!("saved observations to {}", path.display());
    }

    match args.out.as_ref() {
        Some(path) => {
            storage::save_figures_json(&report.figures, path, args.pretty)?;
            eprintln!("Wrote {} figures to {}", report.figures.len(), path.display());
        }
        None => {
            let s = if args.pretty {
                serde_json::to_string_pretty(&report.figures)?
            } else {
                serde_json::to_string(&report.figures)?
            };
            println!("{}", s);
        }
    }

    Ok(())
}
