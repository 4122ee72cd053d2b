//! Plain-text result file
//!
//! Records are written one per line as `<vdp_url>|<label>`. The file is first
//! written next to its destination and then renamed into place, so a reader
//! never sees a partial result list.

use super::traits::{ResultWriter, VdpRecord};
use crate::SeederError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes records to a text file
#[derive(Debug, Clone)]
pub struct FileResultWriter {
    path: PathBuf,
}

impl FileResultWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Joins records into the output file body
pub fn render_records(records: &[VdpRecord]) -> String {
    records
        .iter()
        .map(VdpRecord::to_line)
        .collect::<Vec<_>>()
        .join("\n")
}

impl ResultWriter for FileResultWriter {
    fn write_records(&self, records: &[VdpRecord]) -> Result<(), SeederError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.temp_path();
        {
            let mut file = std::fs::File::create(&temp_path)?;
            file.write_all(render_records(records).as_bytes())?;
            file.sync_all()?;
        }

        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}
