// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batch generation of card images.
//!
//! Renders a set of cards with a [`CardComposer`] in parallel and writes one PNG per card,
//! either flat into a directory or laid out as an asset catalog.

use card_raster::{CardAttributes, CardComposer, Pixmap};
use log::{info, warn};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_PREFIX: &str = "ALTC_";

#[derive(Error, Debug)]
pub enum GenError {
    #[error("failed to render card {code}")]
    Render {
        code: String,
        #[source]
        source: card_raster::Error,
    },
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode PNG")]
    Encode(#[from] png::EncodingError),
    #[error("failed to optimize PNG")]
    Optimize(#[from] oxipng::PngError),
}

pub type Result<T, E = GenError> = std::result::Result<T, E>;

/// Where each card image is placed below the output directory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputLayout {
    /// `<dir>/<name>.png`
    #[default]
    Flat,
    /// `<dir>/<name>.imageset/<name>.png`, with a `Contents.json` next to the image.
    AssetCatalog,
}

#[derive(Clone, Debug)]
pub struct Options {
    pub out_dir: PathBuf,
    /// Prepended to the card code to form the file name.
    pub prefix: String,
    pub layout: OutputLayout,
    /// Recompress written files with oxipng.
    pub optimize: bool,
    /// Keep rendering after a card fails instead of stopping at the first failure.
    pub keep_going: bool,
}

impl Options {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            layout: OutputLayout::default(),
            optimize: false,
            keep_going: false,
        }
    }

    /// The asset name of `card`, e.g. `ALTC_RDS2`.
    pub fn name(&self, card: &CardAttributes) -> String {
        format!("{}{}", self.prefix, card.code())
    }

    /// The path the image of `card` is written to.
    pub fn path(&self, card: &CardAttributes) -> PathBuf {
        let name = self.name(card);
        match self.layout {
            OutputLayout::Flat => self.out_dir.join(format!("{name}.png")),
            OutputLayout::AssetCatalog => self
                .out_dir
                .join(format!("{name}.imageset"))
                .join(format!("{name}.png")),
        }
    }
}

/// The outcome of a batch.
#[derive(Debug, Default)]
pub struct Report {
    pub written: Vec<PathBuf>,
    /// Cards that failed, only filled when [`Options::keep_going`] is set.
    pub failed: Vec<(CardAttributes, GenError)>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Render `cards` and write them to disk.
///
/// Without [`Options::keep_going`] the first failure aborts the batch and is returned.
/// Files written before the failure stay on disk.
pub fn render_all(
    composer: &CardComposer,
    cards: &[CardAttributes],
    options: &Options,
) -> Result<Report> {
    create_dir(&options.out_dir)?;

    let mut report = Report::default();

    if options.keep_going {
        let results = cards
            .par_iter()
            .map(|card| (*card, write_card(composer, card, options)))
            .collect::<Vec<_>>();

        for (card, result) in results {
            match result {
                Ok(path) => report.written.push(path),
                Err(e) => {
                    warn!("skipping {card}: {e}");
                    report.failed.push((card, e));
                }
            }
        }
    } else {
        report.written = cards
            .par_iter()
            .map(|card| write_card(composer, card, options))
            .collect::<Result<Vec<_>>>()?;
    }

    info!(
        "wrote {} card(s) to {}",
        report.written.len(),
        options.out_dir.display()
    );

    Ok(report)
}

/// Render a single card and write it to its path.
pub fn write_card(
    composer: &CardComposer,
    card: &CardAttributes,
    options: &Options,
) -> Result<PathBuf> {
    let pixmap = composer.compose(card).map_err(|source| GenError::Render {
        code: card.code().to_string(),
        source,
    })?;

    let mut data = encode_png(&pixmap)?;
    if options.optimize {
        data = oxipng::optimize_from_memory(&data, &oxipng::Options::default())?;
    }

    let path = options.path(card);
    if let Some(dir) = path.parent() {
        create_dir(dir)?;
    }
    if options.layout == OutputLayout::AssetCatalog {
        write_contents(&path)?;
    }

    fs::write(&path, data).map_err(|source| GenError::Io {
        path: path.clone(),
        source,
    })?;
    info!("{}", path.display());

    Ok(path)
}

/// Encode `pixmap` as an RGBA8 PNG.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    let mut pixmap = pixmap.clone();
    pixmap.unpremultiply();

    let mut out = vec![];
    let mut encoder = png::Encoder::new(&mut out, pixmap.width() as u32, pixmap.height() as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(pixmap.data())?;
    writer.finish()?;

    Ok(out)
}

/// Write the image set manifest next to `image` unless one exists already.
fn write_contents(image: &Path) -> Result<()> {
    let Some(dir) = image.parent() else {
        return Ok(());
    };
    let path = dir.join("Contents.json");
    if path.exists() {
        return Ok(());
    }

    let filename = image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let contents = serde_json::json!({
        "images": [
            { "filename": filename, "idiom": "universal", "scale": "1x" },
            { "idiom": "universal", "scale": "2x" },
            { "idiom": "universal", "scale": "3x" },
        ],
        "info": { "author": "xcode", "version": 1 },
    });

    let text = serde_json::to_string_pretty(&contents).map_err(|e| GenError::Io {
        path: path.clone(),
        source: e.into(),
    })?;
    fs::write(&path, text).map_err(|source| GenError::Io { path, source })
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| GenError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{Options, OutputLayout};
    use card_raster::CardAttributes;
    use std::path::Path;

    #[test]
    fn file_names() {
        let card: CardAttributes = "RDS2".parse().unwrap();
        let mut options = Options::new("out");

        assert_eq!(options.name(&card), "ALTC_RDS2");
        assert_eq!(options.path(&card), Path::new("out/ALTC_RDS2.png"));

        options.prefix = String::new();
        options.layout = OutputLayout::AssetCatalog;
        assert_eq!(options.path(&card), Path::new("out/RDS2.imageset/RDS2.png"));
    }

    #[test]
    fn names_are_unique() {
        let options = Options::new("out");
        let mut names = CardAttributes::all()
            .map(|card| options.name(&card))
            .collect::<Vec<_>>();
        names.sort();
        names.dedup();

        assert_eq!(names.len(), 81);
    }
}
