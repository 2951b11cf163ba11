//! Batch downloads of selected variants.

use crate::error::BrowserError;
use crate::status_bar::StatusBar;
use crate::task_queue::SerialQueue;
use gofont_catalog::{CatalogError, FontManager, SelectedFont};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Status shown once a batch has finished.
pub const DOWNLOADS_COMPLETE: &str = "Font Downloads Complete";

/// Destination for downloaded font data.
pub trait FontWriter: Send + Sync {
    /// Write `data` to `path`, replacing any existing file.
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), BrowserError>;
}

/// Writes straight to the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsWriter;

impl FontWriter for FsWriter {
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), BrowserError> {
        let io_err = |source| BrowserError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, data).map_err(io_err)
    }
}

/// Outcome of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// Files written, in batch order.
    pub saved: Vec<PathBuf>,
    /// Fonts that could not be resolved, fetched or written.
    pub failed: Vec<SelectedFont>,
}

/// A batch queued on the download queue.
#[derive(Debug)]
pub struct DownloadHandle {
    fonts: Vec<SelectedFont>,
    rx: oneshot::Receiver<DownloadReport>,
}

impl DownloadHandle {
    /// The batch snapshot, sorted by family then variant id.
    pub fn fonts(&self) -> &[SelectedFont] {
        &self.fonts
    }

    /// Block until the batch finishes.
    pub fn wait(self) -> Result<DownloadReport, BrowserError> {
        self.rx
            .blocking_recv()
            .map_err(|_| BrowserError::Queue("download batch was dropped".to_string()))
    }
}

/// Inputs shared by every batch in a session.
#[derive(Clone)]
pub struct Downloader {
    queue: Arc<SerialQueue>,
    manager: Arc<FontManager>,
    status: StatusBar,
}

impl Downloader {
    pub fn new(queue: Arc<SerialQueue>, manager: Arc<FontManager>, status: StatusBar) -> Self {
        Self {
            queue,
            manager,
            status,
        }
    }

    /// Queue a batch that saves `fonts` into `dir` through `writer`.
    pub fn start(
        &self,
        fonts: Vec<SelectedFont>,
        dir: PathBuf,
        writer: Arc<dyn FontWriter>,
    ) -> DownloadHandle {
        let (tx, rx) = oneshot::channel();
        let this = self.clone();
        let batch = fonts.clone();
        self.queue.exec(move || {
            let report = this.run_batch(&batch, &dir, writer.as_ref());
            let _ = tx.send(report);
        });
        DownloadHandle { fonts, rx }
    }

    /// Download and save each font in turn; one failure never stops the rest.
    fn run_batch(&self, fonts: &[SelectedFont], dir: &Path, writer: &dyn FontWriter) -> DownloadReport {
        crate::debug_info!("DOWNLOAD", "Starting batch of {} fonts into {:?}", fonts.len(), dir);
        let mut report = DownloadReport::default();

        for font in fonts {
            match self.download_one(font, dir, writer) {
                Ok(path) => report.saved.push(path),
                Err(e) => {
                    crate::debug_error!("DOWNLOAD", "Skipping {}: {}", font, e);
                    report.failed.push(font.clone());
                }
            }
        }

        log::info!(
            "Download batch finished: {} saved, {} failed",
            report.saved.len(),
            report.failed.len()
        );
        self.status.flash(DOWNLOADS_COMPLETE);
        report
    }

    fn download_one(
        &self,
        font: &SelectedFont,
        dir: &Path,
        writer: &dyn FontWriter,
    ) -> Result<PathBuf, BrowserError> {
        let family = self.manager.resolve(font)?;
        let filename = family
            .variant(font.variant_id())
            .map(|v| v.filename())
            .ok_or_else(|| {
                CatalogError::Lookup(format!(
                    "unable to find variant '{}' of '{}'",
                    font.variant_id(),
                    font.family()
                ))
            })?;

        self.status.set(format!("Downloading {filename}..."));
        let data = self
            .manager
            .download(font)
            .ok_or_else(|| BrowserError::Download(format!("no data received for {font}")))?;

        self.status.set(format!("Saving {filename}..."));
        let path = dir.join(&filename);
        writer.write(&path, &data)?;
        crate::debug_log!("DOWNLOAD", "Saved {} ({} bytes)", path.display(), data.len());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_writer_creates_dirs_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("Lato-Regular.ttf");

        FsWriter.write(&path, b"old").unwrap();
        FsWriter.write(&path, b"new").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_fs_writer_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let err = FsWriter.write(&blocker.join("Lato-Regular.ttf"), b"data").unwrap_err();
        match err {
            BrowserError::Io { path, .. } => assert!(path.ends_with("Lato-Regular.ttf")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
