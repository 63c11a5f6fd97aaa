//! Bulk image export
//!
//! Media files fetched during a run are cached under a dated local
//! directory; this module packages that directory into a flat, dated zip
//! archive (`exportimages_<dd-mm-YYYY>.zip`) for handover to the target
//! environment. Export is best-effort: a failed archive is logged and never
//! fails the import run that requested it.

use crate::config::Config;
use crate::error::Result;
use chrono::Local;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};
use zip::ZipWriter;
use zip::write::FileOptions;

/// Packages locally cached media into dated archives
pub struct AssetExporter {
    config: Arc<Config>,
}

impl AssetExporter {
    /// Create an exporter over the configured image directories
    pub fn new(config: Arc<Config>) -> AssetExporter {
        AssetExporter { config }
    }

    /// Export the current run's image directory, best-effort
    ///
    /// The archive lands in the configured export directory under a dated
    /// name. Failures are logged and swallowed; callers never see them.
    pub fn export_images(&self) {
        let archive = self.config.images.export_dir.join(format!(
            "exportimages_{}.zip",
            Local::now().format("%d-%m-%Y")
        ));
        let directory = self.config.images.local_storage_dir();

        match zip_directory(&directory, &archive) {
            Ok(count) => {
                info!(archive = %archive.display(), files = count, "image archive created");
            }
            Err(err) => {
                error!(
                    %err,
                    directory = %directory.display(),
                    archive = %archive.display(),
                    "image export failed"
                );
            }
        }
    }
}

/// Archive every regular file directly under `directory` into `archive`
///
/// Entries are added flat by base name; subdirectories and their contents
/// are not descended into. Returns the number of files archived.
///
/// # Errors
///
/// Returns an error when the directory cannot be read or the archive cannot
/// be written or closed.
pub fn zip_directory(directory: &Path, archive: &Path) -> Result<usize> {
    let entries = std::fs::read_dir(directory)?;

    let file = File::create(archive)?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default();
    let mut count = 0usize;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        zip.start_file(name, options)?;
        let mut source = File::open(&path)?;
        std::io::copy(&mut source, &mut zip)?;
        count += 1;
    }

    zip.finish()?;
    Ok(count)
}
