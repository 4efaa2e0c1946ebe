// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lodging_insights::{pipeline, Config, ConfigOverrides, SourceFormat};

/// Clean a lodging record collection and produce descriptive figures
#[derive(Parser, Debug)]
#[command(name = "lodging-insights")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "LODGING_CONFIG")]
    config: Option<PathBuf>,

    /// Stored record collection (.json or .csv)
    #[arg(short, long, global = true, env = "LODGING_INPUT")]
    input: Option<PathBuf>,

    /// Input format, overrides extension detection (json, csv)
    #[arg(long, global = true, env = "LODGING_INPUT_FORMAT")]
    input_format: Option<SourceFormat>,

    /// Cleaned CSV destination
    #[arg(short, long, global = true, env = "LODGING_OUTPUT")]
    output: Option<PathBuf>,

    /// Directory for figure documents
    #[arg(long, global = true, env = "LODGING_FIGURES_DIR")]
    figures_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load, clean, persist and write figures (default)
    Clean,
    /// Browse figures for an existing cleaned file in the terminal
    View,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lodging_insights=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let overrides = ConfigOverrides {
        input: args.input,
        input_format: args.input_format,
        output: args.output,
        figures_dir: args.figures_dir,
    };
    let config = Config::load(args.config.as_deref(), overrides)
        .context("Failed to load configuration")?;

    match args.command.unwrap_or(Command::Clean) {
        Command::Clean => run_clean(&config),
        Command::View => run_view(&config),
    }
}

fn run_clean(config: &Config) -> Result<()> {
    println!("🧹 Lodging Insights - Clean & Chart");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", config.input.display());
    println!("💾 Output:  {}", config.output.display());
    println!("📊 Figures: {}", config.figures_dir.display());

    let summary = pipeline::run(config).context("Pipeline aborted")?;

    println!("\n✓ Loaded {} records", summary.records_loaded);
    println!("✓ {}", summary.report.summary());
    for fill in summary.report.fills.iter().filter(|f| f.imputed > 0) {
        println!(
            "  • {:<16} {} imputed with {}",
            fill.column.name(),
            fill.imputed,
            fill.fill_value.as_deref().unwrap_or("-")
        );
    }
    println!("✓ Wrote {} figures", summary.figures.len());
    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🎉 {}", summary.summary());
    println!("   sha256 {}", summary.fingerprint);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_view(config: &Config) -> Result<()> {
    use lodging_insights::{build_figures, read_cleaned_csv};

    if !config.output.exists() {
        eprintln!("❌ Cleaned file not found: {}", config.output.display());
        eprintln!("   Run: lodging-insights clean");
        std::process::exit(1);
    }

    let table = read_cleaned_csv(&config.output).context("Failed to read cleaned table")?;
    let figures = build_figures(&table, &config.figure_options());

    let mut app = ui::App::new(figures, table);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_view(_config: &Config) -> Result<()> {
    eprintln!("❌ Viewer not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
