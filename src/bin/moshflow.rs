use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::StdRng};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "moshflow", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a project and print the report. Exits with status 1 when invalid.
    Validate(InArgs),
    /// Print the composed flat operation list.
    Compose(InArgs),
    /// Print a synthetic structural stream.
    Stream(StreamArgs),
    /// Run one scope level of a project's graphs over its structural stream.
    Apply(ApplyArgs),
    /// Print before/after frame statistics for the timeline chain.
    Analyze(InArgs),
}

#[derive(Parser, Debug)]
struct InArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct StreamArgs {
    /// Length in frames.
    #[arg(long)]
    duration: i64,

    /// Frame rate.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Print only the frame type letters.
    #[arg(long, default_value_t = false)]
    pattern: bool,
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scope level whose chains run.
    #[arg(long, value_enum, default_value_t = ScopeArg::Timeline)]
    scope: ScopeArg,

    /// RNG seed; defaults to the project's seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Print only the frame type letters.
    #[arg(long, default_value_t = false)]
    pattern: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScopeArg {
    Timeline,
    Track,
    Clip,
}

impl From<ScopeArg> for moshflow::ScopeKind {
    fn from(s: ScopeArg) -> Self {
        match s {
            ScopeArg::Timeline => Self::Timeline,
            ScopeArg::Track => Self::Track,
            ScopeArg::Clip => Self::Clip,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Compose(args) => cmd_compose(args),
        Command::Stream(args) => cmd_stream(args),
        Command::Apply(args) => cmd_apply(args),
        Command::Analyze(args) => cmd_analyze(args),
    }
}

fn load_project(path: &Path) -> anyhow::Result<moshflow::Project> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read project '{}'", path.display()))?;
    moshflow::Project::from_json_str(&s)
        .with_context(|| format!("parse project '{}'", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_validate(args: InArgs) -> anyhow::Result<()> {
    let project = load_project(&args.in_path)?;
    let report = moshflow::validate_project(&project);
    print_json(&report)?;
    if !report.valid {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_compose(args: InArgs) -> anyhow::Result<()> {
    let project = load_project(&args.in_path)?;
    print_json(&moshflow::compose_operations(&project.operations))
}

fn cmd_stream(args: StreamArgs) -> anyhow::Result<()> {
    let stream = moshflow::build_structural_stream(args.duration, args.fps);
    if args.pattern {
        println!("{}", stream.pattern());
        return Ok(());
    }
    print_json(&stream)
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let project = load_project(&args.in_path)?;
    let stream = moshflow::build_structural_stream(project.duration_frames, project.fps);
    let pipeline = moshflow::build_pipeline(&project.graphs);
    let mut rng = StdRng::seed_from_u64(args.seed.unwrap_or(project.seed));
    let out = moshflow::apply_pipeline(&stream, &pipeline, args.scope.into(), &mut rng);
    if args.pattern {
        println!("{}", out.pattern());
        return Ok(());
    }
    print_json(&out)
}

fn cmd_analyze(args: InArgs) -> anyhow::Result<()> {
    let project = load_project(&args.in_path)?;
    let analysis = moshflow::analyze_project(&project)?;
    print_json(&analysis)
}
