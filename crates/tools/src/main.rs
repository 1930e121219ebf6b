use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use styler::{MapLayout, StyleSheet};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tools::{LayoutOverride, ids_report, inspect_report, load_map, read_sheet, read_svg, style_svg};

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and style SVG municipality maps")]
struct Args {
    /// Id of the element holding the shapes (default: tracados)
    #[arg(long, global = true)]
    shapes: Option<String>,

    /// Id of the element holding the labels (default: nomes)
    #[arg(long, global = true)]
    labels: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the Location ids, in shape order
    Ids { svg: PathBuf },

    /// Print the current fill, stroke, label color, weight and visibility
    Inspect { svg: PathBuf },

    /// Apply a JSON stylesheet and write the styled SVG
    Style {
        svg: PathBuf,

        /// Stylesheet JSON file
        #[arg(long)]
        sheet: PathBuf,

        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Render this Location in its hover state
        #[arg(long)]
        hover: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let layout = LayoutOverride {
        shapes: args.shapes,
        labels: args.labels,
    };

    match args.command {
        Command::Ids { svg } => {
            let map = load_map(&read_svg(&svg)?, layout.resolve(MapLayout::default()))?;
            print!("{}", ids_report(&map));
        }
        Command::Inspect { svg } => {
            let map = load_map(&read_svg(&svg)?, layout.resolve(MapLayout::default()))?;
            print!("{}", inspect_report(&map));
        }
        Command::Style {
            svg,
            sheet,
            out,
            hover,
        } => {
            let sheet: StyleSheet = read_sheet(&sheet)?;
            let styled = style_svg(&read_svg(&svg)?, &sheet, &layout, hover.as_deref())?;
            match out {
                Some(path) => {
                    fs::write(&path, styled)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "wrote styled svg");
                }
                None => println!("{styled}"),
            }
        }
    }
    Ok(())
}
