//! slidefit CLI - Marp slide overflow fixer

mod config_file;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;

use config_file::FileConfig;
use slidefit::{FixConfig, FixOutcome, FixStatus, SlideFixer};

#[derive(Parser)]
#[command(name = "slidefit")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Fix overflowing slides in Marp Markdown decks", long_about = None)]
struct Cli {
    /// Input Marp Markdown file
    #[arg(short = 'i', long = "in", value_name = "FILE")]
    input: PathBuf,

    /// Where to write the fixed deck
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    output: PathBuf,

    /// Config file (default: slidefit.config.json if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum measure-and-fix iterations
    #[arg(long, value_name = "N")]
    max_iter: Option<usize>,

    /// Split lists longer than this many items
    #[arg(long, value_name = "N")]
    list_max_items: Option<usize>,

    /// Split paragraphs longer than this many characters
    #[arg(long, value_name = "N")]
    paragraph_max_chars: Option<usize>,

    /// Safety margin applied when scaling fonts
    #[arg(long, value_name = "RATIO")]
    font_step: Option<f64>,

    /// Smallest font scale to apply
    #[arg(long, value_name = "RATIO")]
    font_min: Option<f64>,

    /// Scratch directory for rendered files
    #[arg(long, value_name = "DIR")]
    temp_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(cli)?;
    log::info!("fixing {}", cli.input.display());
    let fixer = SlideFixer::new(config);
    let outcome = fixer.fix_file(&cli.input, &cli.output)?;
    print_summary(cli, &outcome);
    Ok(())
}

/// Merge settings: defaults, then the config file, then CLI flags.
fn build_config(cli: &Cli) -> Result<FixConfig, Box<dyn std::error::Error>> {
    let mut config = FixConfig::default();

    let file = match &cli.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => match config_file::discover() {
            Some(path) => Some(FileConfig::load(&path)?),
            None => None,
        },
    };
    if let Some(file) = file {
        config = file.apply(config);
    }

    if let Some(v) = cli.max_iter {
        config.max_iterations = v;
    }
    if let Some(v) = cli.list_max_items {
        config.list_max_items = v;
    }
    if let Some(v) = cli.paragraph_max_chars {
        config.paragraph_max_chars = v;
    }
    if let Some(v) = cli.font_step {
        config.font_step = v;
    }
    if let Some(v) = cli.font_min {
        config.font_min = v;
    }
    if let Some(v) = &cli.temp_dir {
        config.temp_dir = v.clone();
    }

    Ok(config)
}

fn print_summary(cli: &Cli, outcome: &FixOutcome) {
    let stats = &outcome.stats;

    println!("{}", "Fix Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Input".bold(), cli.input.display());
    println!("{}: {}", "Output".bold(), cli.output.display());
    println!("{}: {}", "Iterations".bold(), stats.iterations);
    println!(
        "{}: {} in, {} out",
        "Slides".bold(),
        stats.initial_slide_count,
        stats.final_slide_count
    );
    println!("{}: {}", "Splits".bold(), stats.slides_split);
    println!(
        "{}: {} local, {} global",
        "Scaled".bold(),
        stats.slides_scaled_locally,
        stats.slides_scaled_globally
    );
    println!("{}: {}%", "Success rate".bold(), success_rate(outcome));
    println!();

    match &outcome.status {
        FixStatus::Converged => println!("{}", "All slides fit".green().bold()),
        FixStatus::Exhausted { unresolved } if unresolved.is_empty() => {
            println!("{}", "Stopped before measuring".yellow())
        }
        FixStatus::Exhausted { unresolved } => {
            let list = unresolved
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!("{} {}", "Still overflowing:".yellow().bold(), list);
        }
    }
}

/// Share of output slides with no remaining overflow, in percent.
fn success_rate(outcome: &FixOutcome) -> u32 {
    let total = outcome.stats.final_slide_count;
    if total == 0 {
        return 100;
    }
    let unresolved = match &outcome.status {
        FixStatus::Converged => 0,
        FixStatus::Exhausted { unresolved } => unresolved.len().min(total),
    };
    (((total - unresolved) as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidefit::FixStats;

    fn outcome(status: FixStatus, slides: usize) -> FixOutcome {
        FixOutcome {
            markdown: String::new(),
            stats: FixStats {
                final_slide_count: slides,
                ..FixStats::default()
            },
            status,
        }
    }

    #[test]
    fn test_success_rate_converged() {
        assert_eq!(success_rate(&outcome(FixStatus::Converged, 8)), 100);
    }

    #[test]
    fn test_success_rate_with_unresolved() {
        let status = FixStatus::Exhausted {
            unresolved: vec![2, 5],
        };
        assert_eq!(success_rate(&outcome(status, 8)), 75);
    }

    #[test]
    fn test_cli_flags_override_defaults() {
        let cli = Cli::parse_from([
            "slidefit",
            "--in",
            "deck.md",
            "--out",
            "fixed.md",
            "--max-iter",
            "5",
            "--font-min",
            "0.6",
            "--temp-dir",
            "/tmp/slidefit",
        ]);
        // The package dir carries no slidefit.config.json, so only the
        // flags apply here.
        let config = build_config(&cli).unwrap();
        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.font_min, 0.6);
        assert_eq!(config.temp_dir, PathBuf::from("/tmp/slidefit"));
        assert_eq!(config.list_max_items, 10);
    }

    #[test]
    fn test_flag_beats_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slidefit.config.json");
        std::fs::write(&path, r#"{"maxIterations": 9, "fontMin": 0.5}"#).unwrap();

        let cli = Cli::parse_from([
            "slidefit",
            "--in",
            "deck.md",
            "--out",
            "fixed.md",
            "--config",
            path.to_str().unwrap(),
            "--max-iter",
            "2",
        ]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.max_iterations, 2);
        assert_eq!(config.font_min, 0.5);
    }

    #[test]
    fn test_missing_required_args_rejected() {
        assert!(Cli::try_parse_from(["slidefit", "--in", "deck.md"]).is_err());
        assert!(Cli::try_parse_from(["slidefit"]).is_err());
    }
}
