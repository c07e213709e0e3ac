//! High-level, ergonomic library API: fit a file to a target ratio, fit a
//! whole folder in parallel with progress events, and list a folder's images.
//! Prefer these entrypoints over the low-level processing modules.
use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::params::FitParams;
use crate::core::processing::pipeline::{FitSummary, fit_image_with_summary};
use crate::core::processing::save::{output_format_for, save_fitted_image};
use crate::error::{Error, Result};
use crate::io::reader::{has_image_extension, open_image};
use crate::types::{AspectRatio, BackgroundColor};

/// Decode `source`, fit it to `params` and write the result to `output`.
/// The output extension is checked before any decoding happens.
pub fn normalize_file(source: &Path, output: &Path, params: &FitParams) -> Result<FitSummary> {
    output_format_for(output)?;
    let image = open_image(source)?;
    let (fitted, summary) = fit_image_with_summary(image, params)?;
    save_fitted_image(&fitted, output)?;
    Ok(summary)
}

/// Boolean form of [`normalize_file`]: failures are logged, never returned.
pub fn fit(
    source: &Path,
    output: &Path,
    ratio: AspectRatio,
    background: BackgroundColor,
    smart_scale: bool,
) -> bool {
    let params = FitParams::new(ratio, background, smart_scale);
    match normalize_file(source, output, &params) {
        Ok(summary) => {
            info!(
                "Processed {:?}: {}x{} -> {}x{}",
                source,
                summary.source_cols,
                summary.source_rows,
                summary.output_cols,
                summary.output_rows
            );
            true
        }
        Err(e) => {
            warn!("Failed to process {:?}: {}", source, e);
            false
        }
    }
}

/// Batch processing report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
}

/// Progress messages sent from batch workers to a single consumer.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Started {
        total: usize,
    },
    Finished {
        index: usize,
        total: usize,
        source: PathBuf,
        outcome: std::result::Result<FitSummary, String>,
    },
    Done(BatchReport),
}

/// Image files directly inside `input_dir`, sorted by path.
pub fn discover_images(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() && has_image_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Fit every image in `input_dir` into `output_dir` under the same file name.
///
/// Images are processed in parallel; one failing image never stops the
/// others. When `events` is given, a [`BatchEvent::Finished`] is sent as each
/// image completes (in completion order) and a final [`BatchEvent::Done`].
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &FitParams,
    events: Option<&Sender<BatchEvent>>,
) -> Result<BatchReport> {
    if !input_dir.is_dir() {
        return Err(Error::InvalidArgument {
            arg: "input_dir",
            value: input_dir.display().to_string(),
        });
    }
    std::fs::create_dir_all(output_dir)?;

    let files = discover_images(input_dir)?;
    let total = files.len();
    if total == 0 {
        warn!("No images found in {:?}", input_dir);
    }
    info!("Processing {} images from {:?} into {:?}", total, input_dir, output_dir);

    let send = |event: BatchEvent| {
        if let Some(tx) = events {
            // A dropped receiver only means nobody is watching
            let _ = tx.send(event);
        }
    };
    send(BatchEvent::Started { total });

    let succeeded: Vec<bool> = files
        .par_iter()
        .enumerate()
        .map(|(index, source)| {
            let Some(file_name) = source.file_name() else {
                return false;
            };
            let output = output_dir.join(file_name);
            let outcome = normalize_file(source, &output, params);
            let ok = outcome.is_ok();
            match &outcome {
                Ok(_) => info!("Processed: {:?}", file_name),
                Err(e) => warn!("Error processing {:?}: {}", source, e),
            }
            send(BatchEvent::Finished {
                index,
                total,
                source: source.clone(),
                outcome: outcome.map_err(|e| e.to_string()),
            });
            ok
        })
        .collect();

    let processed = succeeded.iter().filter(|ok| **ok).count();
    let report = BatchReport {
        total,
        processed,
        failed: total - processed,
    };

    info!("Batch processing complete!");
    info!("Processed: {}/{}", report.processed, report.total);
    info!("Errors: {}", report.failed);

    send(BatchEvent::Done(report));
    Ok(report)
}
