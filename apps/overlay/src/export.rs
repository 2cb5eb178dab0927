//! Append-only CSV log of resolved systems.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use ceti_model::CombinedResolution;

const HEADER: [&str; 5] = ["System Name", "Status", "Time Saved", "EDSM Link", "Reference Id"];

/// Appends one row per saved system. The header is written only when
/// the file starts out empty.
pub struct ExportLog {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl ExportLog {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_empty = file.metadata()?.len() == 0;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        if is_empty {
            writer.write_record(HEADER)?;
            writer.flush()?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a resolution and flushes it to disk.
    pub fn append(&mut self, resolution: &CombinedResolution) -> anyhow::Result<()> {
        let edsm = resolution.result("edsm");
        let link = edsm
            .and_then(|r| r.url.as_deref())
            .filter(|_| resolution.overall_visited)
            .unwrap_or("N/A");
        let reference = edsm
            .and_then(|r| r.reference_id)
            .map(|id| id.to_string())
            .unwrap_or_default();
        let saved_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        self.writer.write_record([
            resolution.system_name.as_str(),
            resolution.status_label(),
            saved_at.as_str(),
            link,
            reference.as_str(),
        ])?;
        self.writer.flush()?;

        tracing::debug!(
            system = %resolution.system_name,
            path = %self.path.display(),
            "system saved"
        );
        Ok(())
    }
}
