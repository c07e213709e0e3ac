use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Default report name written into the scanned folder.
pub const INVENTORY_FILE_NAME: &str = "inventory.json";

const INVENTORY_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tiff"];

/// One image file found while walking a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// File name without extension
    pub article: String,
    /// Left empty for the user to fill in
    pub position: String,
    pub path: PathBuf,
}

fn is_inventory_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| INVENTORY_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Walk `folder` recursively and list the image files in it. With a
/// `base_path`, each entry's path is rewritten to `base_path/<file name>`.
pub fn build_inventory(folder: &Path, base_path: Option<&Path>) -> Result<Vec<InventoryEntry>> {
    if !folder.is_dir() {
        return Err(Error::InvalidArgument {
            arg: "folder",
            value: folder.display().to_string(),
        });
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(folder).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_inventory_image(path) {
            continue;
        }
        let (Some(stem), Some(file_name)) = (path.file_stem(), path.file_name()) else {
            continue;
        };

        let listed_path = match base_path {
            Some(base) => base.join(file_name),
            None => path.to_path_buf(),
        };
        entries.push(InventoryEntry {
            article: stem.to_string_lossy().into_owned(),
            position: String::new(),
            path: listed_path,
        });
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    info!("Inventory of {:?}: {} image files", folder, entries.len());
    Ok(entries)
}

/// Scan `folder` and write the report to `output`. When no image is found
/// nothing is written and the empty list is returned.
pub fn write_inventory_report(
    folder: &Path,
    base_path: Option<&Path>,
    output: &Path,
) -> Result<Vec<InventoryEntry>> {
    let entries = build_inventory(folder, base_path)?;
    if entries.is_empty() {
        warn!("No image files found in {:?}, report not written", folder);
        return Ok(entries);
    }
    write_inventory(&entries, output)?;
    Ok(entries)
}

/// Write entries as a pretty-printed JSON array.
pub fn write_inventory(entries: &[InventoryEntry], output: &Path) -> Result<()> {
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, entries)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!("Inventory written to {:?}", output);
    Ok(())
}
