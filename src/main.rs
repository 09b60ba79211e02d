use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};

use rasterlab::config::{BLUR_RADIUS_RANGE, BRIGHTNESS_RANGE};
use rasterlab::{EditSession, Filter};

/// Apply editor filters to an image from the command line.
#[derive(Parser, Debug)]
#[command(name = "rasterlab", version, about)]
struct Cli {
    /// Image to read (any format the codec supports)
    input: PathBuf,

    /// Where to write the result; the format follows the extension
    output: PathBuf,

    /// Filters to apply in order: grayscale, hderiv, vderiv, sobel,
    /// blur:N, brightness:N
    #[arg(short, long = "filter", value_name = "FILTER")]
    filters: Vec<Filter>,

    /// Shortcut for a trailing `blur:N`
    #[arg(long, value_name = "N")]
    blur_radius: Option<i32>,

    /// Shortcut for a trailing `brightness:N`
    #[arg(long, value_name = "N")]
    brightness: Option<i32>,

    /// Undo the last N filters before saving
    #[arg(long, default_value_t = 0)]
    revert: usize,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn pipeline(&self) -> Vec<Filter> {
        let mut filters = self.filters.clone();
        if let Some(radius) = self.blur_radius {
            filters.push(Filter::Blur { radius });
        }
        if let Some(amount) = self.brightness {
            filters.push(Filter::Brightness { amount });
        }
        filters
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let pipeline = cli.pipeline();
    if pipeline.is_empty() && cli.revert == 0 {
        bail!("no filters given; pass at least one --filter");
    }

    let mut session = EditSession::new();
    session
        .open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?;

    for filter in &pipeline {
        match filter {
            Filter::Blur { radius } if !BLUR_RADIUS_RANGE.contains(radius) => {
                warn!("blur radius {} is outside the slider range {:?}", radius, BLUR_RADIUS_RANGE)
            }
            Filter::Brightness { amount } if !BRIGHTNESS_RANGE.contains(amount) => {
                warn!("brightness {} is outside the slider range {:?}", amount, BRIGHTNESS_RANGE)
            }
            _ => {}
        }
        session
            .apply(filter)
            .with_context(|| format!("filter {} failed", filter))?;
        info!("applied {}", filter);
    }

    for _ in 0..cli.revert {
        if !session.revert() {
            warn!("nothing left to revert");
            break;
        }
    }

    session
        .save(&cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    Ok(())
}
