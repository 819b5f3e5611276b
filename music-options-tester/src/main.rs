mod common;
mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use music_options::{Category, MusicConfig, MusicOptions, TrackId};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use common::parse_categories;
use logic::host::MemoryHost;
use logic::{RunReport, SamplePlan, run_refresh_scenario, run_sampling};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TestMode {
    /// Resolve each category many times and check the distribution
    Sample,
    /// Scripted mid-activity change against an in-memory host
    Refresh,
    /// Print the entries the options menu would register
    Menu,
}

#[derive(Debug, Parser)]
#[command(name = "music-options-tester", version)]
#[command(about = "QA tool for music option tables: menu layout, resolver sampling and refresh")]
struct Args {
    /// Test mode: sample, refresh or menu
    #[arg(long, value_enum, default_value_t = TestMode::Sample)]
    mode: TestMode,

    /// JSON configuration to load instead of the bundled defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Categories to check (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    categories: String,

    /// Stored menu index used while sampling
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    choice: i32,

    /// Resolutions per category (sample mode only)
    #[arg(long, default_value_t = 1000)]
    trials: usize,

    /// Seed for the random source
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Allowed distance of each Random share from uniform
    #[arg(long, default_value_t = 0.05)]
    tolerance: f64,

    /// Per-map default the in-memory host reports (sample mode only)
    #[arg(long)]
    map_track: Option<String>,

    /// List all categories and exit
    #[arg(long)]
    list_categories: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if maybe_list_categories(&args)? {
        return Ok(());
    }

    if wants_banner(&args) {
        announce_banner();
    }

    let start_time = Instant::now();
    let config = load_config(args.config.as_deref())?;
    let engine = MusicOptions::with_seed(config, args.seed)
        .context("music options configuration is invalid")?;
    let categories = parse_categories(&args.categories)?;

    let report = run_mode(&args, &engine, &categories);
    write_report(&args, &report, start_time)?;

    if !report.passed() {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn maybe_list_categories(args: &Args) -> Result<bool> {
    if !args.list_categories {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available categories:")?;
    for category in Category::ALL {
        let kind = if category.is_continuous() {
            "continuous"
        } else {
            "battle"
        };
        writeln!(
            output_target.writer(),
            "  {:18} - {kind} ({})",
            category.key(),
            category.menu_key()
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

/// JSON on stdout must stay machine-readable.
fn wants_banner(args: &Args) -> bool {
    args.report != "json" || args.output.is_some()
}

fn announce_banner() {
    println!("{}", "🎵 Music Options Tester".bright_cyan().bold());
    println!("{}", "=======================".cyan());
}

fn load_config(path: Option<&Path>) -> Result<MusicConfig> {
    let Some(path) = path else {
        return Ok(MusicConfig::default_config());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    MusicConfig::from_json(&json).with_context(|| format!("failed to load {}", path.display()))
}

fn run_mode(args: &Args, engine: &MusicOptions, categories: &[Category]) -> RunReport {
    match args.mode {
        TestMode::Sample => {
            let plan = SamplePlan {
                choice: args.choice,
                trials: args.trials,
                tolerance: args.tolerance,
                map_track: args.map_track.as_deref().map(TrackId::from),
            };
            RunReport::Sample(
                categories
                    .iter()
                    .map(|&category| run_sampling(engine, category, &plan))
                    .collect(),
            )
        }
        TestMode::Refresh => RunReport::Refresh(
            categories
                .iter()
                .filter(|category| category.is_continuous())
                .map(|&category| run_refresh_scenario(engine, category))
                .collect(),
        ),
        TestMode::Menu => {
            let mut host = MemoryHost::new();
            let registered = engine.register_menu(&mut host.menu);
            log::debug!("{registered} menu entries registered");
            RunReport::Menu(
                host.menu
                    .entries
                    .into_iter()
                    .filter(|entry| categories.contains(&entry.category))
                    .collect(),
            )
        }
    }
}

fn write_report(args: &Args, report: &RunReport, start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, report)?,
        "markdown" => {
            if report.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Music Options Results\n\n_No checks executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, report)?;
            }
        }
        _ => {
            if report.is_empty() {
                writeln!(&mut output_target, "No checks executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    report,
                    start_time.elapsed(),
                )?;
            }
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
