use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use runlayout_core::{
    estimate_production_time, validate_layout, LayoutOption, OptimizationRequest, Optimizer,
    TimingConfig,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "runlayout")]
#[command(about = "Production-run layout optimizer - gang label items into press runs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and rank layout options for an order
    Optimize {
        /// Request file with items, dieline and optional weights (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the ranked options (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that saved options cover every item of a request exactly
    Validate {
        /// Saved options (JSON)
        #[arg(long)]
        options: PathBuf,

        /// Request the options were generated for (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Estimate press time for saved options
    Estimate {
        /// Saved options (JSON)
        #[arg(long)]
        options: PathBuf,

        /// Request whose press timing to use; standard timing when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Optimize { input, output } => {
            optimize_command(input, output)?;
        }
        Commands::Validate { options, input } => {
            validate_command(options, input)?;
        }
        Commands::Estimate { options, input } => {
            estimate_command(options, input)?;
        }
    }

    Ok(())
}

fn load_request(path: &Path) -> Result<OptimizationRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading request {}", path.display()))?;

    let request: OptimizationRequest = match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };
    debug!("Loaded request from {}", path.display());

    Ok(request)
}

fn load_options(path: &Path) -> Result<Vec<LayoutOption>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading options {}", path.display()))?;
    Ok(serde_json::from_str(&content)?)
}

fn optimize_command(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    println!("{}", "🔍 Loading request...".bright_blue());

    let request = load_request(&input)?;

    println!(
        "  {} items, {} labels",
        request.items.len().to_string().bright_white().bold(),
        request
            .items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum::<u64>()
            .to_string()
            .bright_white()
            .bold()
    );
    println!(
        "  {} lanes across, {} mm labels",
        request
            .dieline
            .columns_across
            .to_string()
            .bright_white()
            .bold(),
        request.dieline.label_height_mm
    );
    println!();

    println!("{}", "🚀 Generating layout options...".bright_blue());

    let optimizer = Optimizer::new(request)?;
    let options = optimizer.generate_layout_options();
    info!("{} options generated", options.len());

    println!();
    println!("{}", "✅ Optimization complete!".bright_green().bold());
    println!();

    println!("{}", "📊 Options (best first):".bright_yellow().bold());
    for option in &options {
        println!(
            "  • {} - {} runs, {:.2} m, {} frames, {:.2} m waste, ~{} min",
            option.id.bright_white().bold(),
            option.runs.len(),
            option.total_meters,
            option.total_frames,
            option.total_waste_meters,
            optimizer.estimate_production_time(option)
        );
        println!(
            "    score {} (material {}, print {}, labor {})",
            option.overall_score.to_string().bright_green(),
            option.material_efficiency_score,
            option.print_efficiency_score,
            option.labor_efficiency_score
        );
        println!("    {}", option.reasoning.bright_cyan());
    }
    println!();

    let json = serde_json::to_string_pretty(&options)?;
    if let Some(output_path) = output {
        std::fs::write(&output_path, json)?;
        println!(
            "💾 Saved options to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn validate_command(options: PathBuf, input: PathBuf) -> Result<()> {
    let request = load_request(&input)?;
    let options = load_options(&options)?;

    let mut invalid = 0;
    for option in &options {
        let report = validate_layout(option, &request.items);
        if report.valid {
            println!("{} {}", "✅".bright_green(), option.id.bright_white());
        } else {
            invalid += 1;
            println!("{} {}", "❌".bright_red(), option.id.bright_white());
            for error in &report.errors {
                println!("    • {}", error.bright_red());
            }
        }
    }

    if invalid > 0 {
        bail!("{} of {} options are invalid", invalid, options.len());
    }

    Ok(())
}

fn estimate_command(options: PathBuf, input: Option<PathBuf>) -> Result<()> {
    let timing = match input {
        Some(path) => load_request(&path)?.press.timing,
        None => TimingConfig::default(),
    };
    let options = load_options(&options)?;

    for option in &options {
        let minutes = estimate_production_time(option, &timing);
        println!(
            "  • {}: {} runs, {} frames, ~{} min",
            option.id.bright_white(),
            option.runs.len(),
            option.total_frames,
            minutes.to_string().bright_white().bold()
        );
    }

    Ok(())
}
