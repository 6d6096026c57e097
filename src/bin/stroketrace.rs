use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "stroketrace", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a lesson and print its warnings.
    Check(CheckArgs),
    /// Print the hint polyline of one guide as JSON.
    Path(PathArgs),
    /// Replay a recorded gesture against a lesson and print chain events as JSON lines.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input lesson JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct PathArgs {
    /// Input lesson JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Guide id as declared in the lesson.
    #[arg(long)]
    guide: String,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input lesson JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Gesture script JSON.
    #[arg(long)]
    gesture: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Path(args) => cmd_path(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let lesson = stroketrace::Lesson::from_path(&args.in_path)?;
    let warnings = lesson
        .validate()
        .with_context(|| format!("validate '{}'", args.in_path.display()))?;

    let mut out = std::io::stdout().lock();
    for w in &warnings {
        writeln!(out, "warning: {w}")?;
    }
    writeln!(
        out,
        "ok: {} guide(s), {} warning(s)",
        lesson.guide_count(),
        warnings.len()
    )?;
    Ok(())
}

fn cmd_path(args: PathArgs) -> anyhow::Result<()> {
    let lesson = stroketrace::Lesson::from_path(&args.in_path)?;
    let line = lesson
        .hint_polyline(&args.guide)
        .with_context(|| format!("build hint path of '{}'", args.guide))?;
    let json = serde_json::to_string_pretty(&line).context("serialize polyline")?;
    println!("{json}");
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let lesson = stroketrace::Lesson::from_path(&args.in_path)?;
    let script = stroketrace::GestureScript::from_path(&args.gesture)?;
    let mut chain = lesson.build_chain()?;

    let mut completed: Vec<stroketrace::GuideId> = Vec::new();
    let events = script.replay(&mut chain, &mut completed);

    let mut out = std::io::stdout().lock();
    for ev in &events {
        let line = serde_json::to_string(ev).context("serialize chain event")?;
        writeln!(out, "{line}")?;
    }

    eprintln!(
        "replayed {} frame(s): {}/{} guide(s) completed{}",
        script.frame_count(),
        completed.len(),
        lesson.guide_count(),
        if chain.is_finished() { ", lesson finished" } else { "" }
    );
    Ok(())
}
