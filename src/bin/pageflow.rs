use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pageflow", version)]
struct Cli {
    /// Log more (repeat for trace output).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario and print the signal timeline.
    Run(RunArgs),
    /// Print the show/hide duration of every page.
    Durations(InArgs),
    /// Check a stage config or scenario without running it.
    Validate(InArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Longest clock advance per update, in seconds.
    #[arg(long, default_value_t = pageflow::DEFAULT_STEP)]
    step: f64,

    /// Print the full report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct InArgs {
    /// Stage config or scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Durations(args) => cmd_durations(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Either input shape the tool accepts.
enum Input {
    Stage(pageflow::StageConfig),
    Scenario(pageflow::Scenario),
}

impl Input {
    fn stage(&self) -> &pageflow::StageConfig {
        match self {
            Self::Stage(cfg) => cfg,
            Self::Scenario(s) => &s.stage,
        }
    }
}

fn read_input(path: &Path) -> anyhow::Result<Input> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| "parse input JSON")?;
    if value.get("stage").is_some() {
        let scenario: pageflow::Scenario =
            serde_json::from_value(value).with_context(|| "parse scenario JSON")?;
        Ok(Input::Scenario(scenario))
    } else {
        let cfg: pageflow::StageConfig =
            serde_json::from_value(value).with_context(|| "parse stage config JSON")?;
        Ok(Input::Stage(cfg))
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let Input::Scenario(scenario) = read_input(&args.in_path)? else {
        anyhow::bail!("'{}' is a stage config, run needs a scenario", args.in_path.display());
    };
    let report = scenario
        .run(args.step)
        .with_context(|| format!("replay '{}'", args.in_path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for s in &report.steps {
        println!("{:>8.3}  request {:?} {} -> {:?}", s.at, s.request, s.page, s.outcome);
    }
    for e in &report.timeline {
        println!("{:>8.3}  {:<32} {}", e.at, e.source, e.signal);
    }
    println!("open at {:.3}: [{}]", report.end, report.open_pages.join(", "));
    Ok(())
}

fn cmd_durations(args: InArgs) -> anyhow::Result<()> {
    let input = read_input(&args.in_path)?;
    let stage = input
        .stage()
        .load(pageflow::SceneGraph::new(), pageflow::Tweener::new())
        .with_context(|| format!("load '{}'", args.in_path.display()))?;
    for d in pageflow::durations(&stage) {
        println!("{:<24} show {:>7.3}  hide {:>7.3}", d.page, d.show, d.hide);
    }
    Ok(())
}

fn cmd_validate(args: InArgs) -> anyhow::Result<()> {
    let input = read_input(&args.in_path)?;
    match &input {
        Input::Stage(cfg) => cfg.validate()?,
        Input::Scenario(s) => s.validate()?,
    }
    eprintln!("ok: {} page(s)", input.stage().pages.len());
    Ok(())
}
