use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

use mazecarve::{Algorithm, GenerationConfig, Palette, generate_with_seed, render};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    /// Depth-first walk that rescans the grid at dead ends
    Backtracker,
    /// Randomized Prim's algorithm
    Prim,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Backtracker => Algorithm::RecursiveBacktracker,
            AlgorithmArg::Prim => Algorithm::PrimsAlgorithm,
        }
    }
}

/// Generate a perfect maze and draw it in the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of cells per row
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u16).range(1..))]
    width: u16,

    /// Number of rows
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u16).range(1..))]
    length: u16,

    /// Carving algorithm
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Backtracker)]
    algorithm: AlgorithmArg,

    /// Random seed, for reproducible mazes
    #[arg(long)]
    seed: Option<u64>,

    /// Paint each carving run in a random color
    #[arg(long)]
    colors: bool,

    /// Check that the result is a perfect maze before printing it
    #[arg(long)]
    verify: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Installs the global subscriber. The returned guard flushes the file writer on drop.
fn init_tracing(args: &Args) -> anyhow::Result<Option<WorkerGuard>> {
    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let builder = tracing_subscriber::fmt().with_max_level(level);

    match &args.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("log file path {} has no file name", path.display()))?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = init_tracing(&args)?;

    let mut config = GenerationConfig::new(args.width, args.length, args.algorithm.into());
    if args.colors {
        config = config.with_random_colors(Palette::default());
    }

    tracing::info!(
        "Generating {}x{} maze with {} (seed: {:?})",
        config.width,
        config.length,
        config.algorithm,
        args.seed
    );
    let maze = generate_with_seed(&config, args.seed).context("maze generation failed")?;

    if args.verify {
        if !maze.is_perfect() || !maze.boundary_intact() {
            bail!("generated maze is not a perfect maze");
        }
        tracing::info!("Verified: spanning tree with intact boundary");
    }

    let mut stdout = std::io::stdout();
    render::print(&maze, &mut stdout)?;
    println!(
        "{}x{} maze, {}, {} passages",
        maze.width(),
        maze.length(),
        maze.algorithm(),
        maze.passages().len()
    );
    Ok(())
}
