//! Deck writer: slide texts -> `.pptx` file.
//!
//! The deck always opens with fixed title, objectives and outline slides,
//! then writes content entries `3..min(len, slides - 2)` as numbered body
//! slides, and closes with conclusions and recommendations taken from the
//! last two entries by position.

mod layout;
mod parts;

pub use layout::{SlideRole, SlideSpec, TextBox};

use chrono::{DateTime, Utc};
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::content::SUBTITLE;
use crate::utils::sanitize_topic;

/// Errors that can occur while writing a deck
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Deck writer task failed: {0}")]
    Task(String),
}

/// File name of the deck for a topic
pub fn deck_file_name(topic: &str) -> String {
    format!("seminar_{}.pptx", sanitize_topic(topic))
}

fn entry(content: &[String], index: usize) -> &str {
    content.get(index).map(String::as_str).unwrap_or_default()
}

/// Lay out the slides of a deck.
///
/// Never fails: a short `content` only shrinks the numbered body range, and
/// the closing slides read whatever sits in the last two positions.
pub fn plan_slides(topic: &str, content: &[String], slides: i64) -> Vec<SlideSpec> {
    let mut specs = vec![
        SlideSpec::title(topic, SUBTITLE),
        SlideSpec::body("Learning Objectives", entry(content, 1)),
        SlideSpec::body("Outline", entry(content, 2)),
    ];

    let len = content.len();
    let body_end = usize::try_from(slides.saturating_sub(2))
        .unwrap_or(0)
        .min(len);
    for (i, text) in content.iter().enumerate().take(body_end).skip(3) {
        specs.push(SlideSpec::body(format!("Slide {}", i + 1), text.as_str()));
    }

    let conclusions = len.checked_sub(2).map(|i| entry(content, i)).unwrap_or_default();
    let recommendations = len.checked_sub(1).map(|i| entry(content, i)).unwrap_or_default();
    specs.push(SlideSpec::body("Conclusions", conclusions));
    specs.push(SlideSpec::body("Recommendations", recommendations));

    specs
}

fn add_part<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    body: String,
) -> Result<(), DeckError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(name, options)?;
    zip.write_all(body.as_bytes())?;
    Ok(())
}

/// Write a complete presentation package into `writer`
pub fn write_package<W: Write + Seek>(
    writer: W,
    title: &str,
    specs: &[SlideSpec],
    created: DateTime<Utc>,
) -> Result<W, DeckError> {
    let mut zip = ZipWriter::new(writer);
    let count = specs.len();

    add_part(&mut zip, "[Content_Types].xml", parts::content_types(count))?;
    add_part(&mut zip, "_rels/.rels", parts::root_rels())?;
    add_part(&mut zip, "docProps/core.xml", parts::core_props(title, created))?;
    add_part(&mut zip, "docProps/app.xml", parts::app_props(count))?;
    add_part(&mut zip, "ppt/presentation.xml", parts::presentation(count))?;
    add_part(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        parts::presentation_rels(count),
    )?;
    add_part(&mut zip, "ppt/presProps.xml", parts::pres_props())?;
    add_part(&mut zip, "ppt/viewProps.xml", parts::view_props())?;
    add_part(&mut zip, "ppt/tableStyles.xml", parts::table_styles())?;
    add_part(&mut zip, "ppt/theme/theme1.xml", parts::theme())?;
    add_part(
        &mut zip,
        "ppt/slideMasters/slideMaster1.xml",
        parts::slide_master(),
    )?;
    add_part(
        &mut zip,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        parts::slide_master_rels(),
    )?;
    add_part(
        &mut zip,
        "ppt/slideLayouts/slideLayout1.xml",
        parts::slide_layout(),
    )?;
    add_part(
        &mut zip,
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        parts::slide_layout_rels(),
    )?;

    for (n, spec) in specs.iter().enumerate() {
        add_part(&mut zip, &parts::slide_part_name(n + 1), parts::slide(spec))?;
        add_part(&mut zip, &parts::slide_rels_part_name(n + 1), parts::slide_rels())?;
    }

    Ok(zip.finish()?)
}

/// Writes decks into an output directory
#[derive(Debug, Clone, Default)]
pub struct DeckWriter {
    output_dir: Option<PathBuf>,
}

impl DeckWriter {
    /// Create a writer; `None` writes into the current directory
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        Self { output_dir }
    }

    /// Output directory, if one is configured
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Path the deck for `topic` is written to
    pub fn deck_path(&self, topic: &str) -> PathBuf {
        let name = deck_file_name(topic);
        match &self.output_dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }

    /// Write the deck and return its path and slide count.
    ///
    /// The package is built in a temporary file beside the target and moved
    /// into place once complete, so a failed write leaves no partial deck.
    pub fn write(
        &self,
        topic: &str,
        content: &[String],
        slides: i64,
    ) -> Result<(PathBuf, usize), DeckError> {
        let specs = plan_slides(topic, content, slides);
        let path = self.deck_path(topic);

        if let Some(dir) = &self.output_dir {
            std::fs::create_dir_all(dir)?;
        }

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::Builder::new()
            .prefix(".seminar_")
            .suffix(".pptx.tmp")
            .tempfile_in(dir)?;
        write_package(tmp.as_file_mut(), topic, &specs, Utc::now())?;
        tmp.persist(&path).map_err(|e| DeckError::Io(e.error))?;

        tracing::debug!("Wrote {} slides to {}", specs.len(), path.display());
        Ok((path, specs.len()))
    }
}
