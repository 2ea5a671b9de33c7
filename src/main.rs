use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};

use continuous_lines::parser::{parse_script, Action};
use continuous_lines::render::{format_points, render_session, RenderOptions, DEFAULT_COLUMNS};
use continuous_lines::session::{Session, DEFAULT_HEIGHT, DEFAULT_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One line of points per request
    Points,
    /// Character drawing of the whole canvas
    Drawing,
}

#[derive(Parser, Debug)]
#[command(
    name = "continuous-lines",
    about = "Route non-crossing orthogonal lines between pairs of points."
)]
struct Cli {
    /// Drawing script to run. Use '-' or omit to read from stdin.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Use ASCII characters only
    #[arg(short = 'a', long = "ascii")]
    use_ascii: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Drawing)]
    format: Format,

    /// Width of the drawing in characters
    #[arg(short, long, default_value_t = DEFAULT_COLUMNS)]
    columns: usize,

    /// Canvas width, overrides the script
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height, overrides the script
    #[arg(long)]
    height: Option<f64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut builder = env_logger::Builder::from_default_env();
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();

    let mut input = String::new();
    match &cli.file {
        Some(path) if path.to_string_lossy() != "-" => {
            input = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
        }
        _ => {
            io::stdin().read_to_string(&mut input)?;
        }
    }

    let script = parse_script(&input)?;
    let width = cli.width.or(script.width).unwrap_or(DEFAULT_WIDTH);
    let height = cli.height.or(script.height).unwrap_or(DEFAULT_HEIGHT);
    let mut session = Session::new(width, height)?;

    for step in &script.steps {
        let resolved = match &step.action {
            Action::Connect { start, end } => session.connect(*start, *end).map(Some),
            Action::Click(point) => session.click(*point),
            Action::Wall(points) => session.add_polyline(points.clone()).map(|_| None),
        }
        .with_context(|| format!("line {}", step.line))?;

        if cli.format == Format::Points {
            if let Some(points) = resolved {
                println!("{}", format_points(&points));
            }
        }
    }

    if let Some(point) = session.pending() {
        return Err(anyhow!("click at {} has no matching second click", point));
    }

    if cli.format == Format::Drawing {
        let options = RenderOptions {
            columns: cli.columns,
            use_ascii: cli.use_ascii,
        };
        println!("{}", render_session(&session, &options));
    }
    Ok(())
}
