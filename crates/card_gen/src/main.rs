// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::{bail, Context, Result};
use card_gen::{render_all, Options, OutputLayout, DEFAULT_PREFIX};
use card_raster::{CardAttributes, CardComposer, CardFamily};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

/// Render the card images of a card family as PNG files.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory the images are written to
    #[arg(short, long, default_value = "cards")]
    out_dir: PathBuf,

    /// Prefix of every file name
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// JSON file overriding the default card family
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Recompress the images with oxipng
    #[arg(long)]
    optimize: bool,

    /// Continue after a card fails to render
    #[arg(short, long)]
    keep_going: bool,

    /// Only render this card, e.g. `RDS2` or `red-diamond-solid-two`
    #[arg(long, value_name = "CODE")]
    only: Option<String>,

    /// Write `<name>.imageset/<name>.png` asset catalog entries
    #[arg(long)]
    asset_catalog: bool,

    /// Log every rendered card
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let family = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<CardFamily>(&text)
                .with_context(|| format!("invalid card family in {}", path.display()))?
        }
        None => CardFamily::default(),
    };
    let composer = CardComposer::new(&family).context("invalid card family")?;

    let cards = match &args.only {
        Some(code) => vec![code
            .parse::<CardAttributes>()
            .with_context(|| format!("unknown card {code:?}"))?],
        None => CardAttributes::all().collect(),
    };

    let options = Options {
        out_dir: args.out_dir,
        prefix: args.prefix,
        layout: if args.asset_catalog {
            OutputLayout::AssetCatalog
        } else {
            OutputLayout::Flat
        },
        optimize: args.optimize,
        keep_going: args.keep_going,
    };

    info!("rendering {} card(s)", cards.len());
    let report = render_all(&composer, &cards, &options)?;

    if !report.is_success() {
        let failed = report.failed.len();
        for (card, e) in report.failed {
            error!("{card}: {:#}", anyhow::Error::new(e));
        }
        bail!("{failed} card(s) failed");
    }

    Ok(())
}
