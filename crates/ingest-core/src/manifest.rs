//! Job manifest loading.
//!
//! The manifest is a YAML file listing the ingestion jobs in the order
//! they run:
//!
//! ```yaml
//! jobs:
//!   - table: women_in_government_v1
//!     file: women_in_government_v1
//!   - table: ratio_production_supervisory
//!     file: ratio_production_supervisory
//! ```
//!
//! Each job pairs a target table name with a source file stem; the driver
//! resolves the stem to `<data_dir>/<file>.txt`. The job list is immutable
//! for the duration of a run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for manifest operations.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Error reading the manifest file
    #[error("failed to read manifest file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("failed to parse manifest YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// One (target table, source file) unit of ingestion work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Target table name (unqualified; the schema comes from configuration).
    pub table: String,

    /// Source file stem, resolved to `<data_dir>/<file>.txt`.
    pub file: String,
}

impl Job {
    /// Resolve this job's source file path under `data_dir`.
    pub fn source_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(format!("{}.txt", self.file))
    }
}

/// The ordered list of ingestion jobs for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub jobs: Vec<Job>,
}

impl Manifest {
    /// Load a manifest from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a manifest from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_MANIFEST: &str = "
jobs:
  - table: women_in_government_v1
    file: women_in_government_v1
  - table: ratio_production_supervisory
    file: ratio_prod_super
";

    #[test]
    fn test_parses_jobs_in_order() {
        let manifest = Manifest::from_yaml(SAMPLE_MANIFEST).unwrap();
        assert_eq!(manifest.jobs.len(), 2);
        assert_eq!(manifest.jobs[0].table, "women_in_government_v1");
        assert_eq!(manifest.jobs[1].file, "ratio_prod_super");
    }

    #[test]
    fn test_job_resolves_source_path_under_data_dir() {
        let job = Job {
            table: "t".to_string(),
            file: "extract".to_string(),
        };
        assert_eq!(
            job.source_path(Path::new("data")),
            PathBuf::from("data/extract.txt")
        );
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        assert!(matches!(
            Manifest::from_yaml("jobs: [table: only"),
            Err(ManifestError::Yaml(_))
        ));
    }

    #[test]
    fn test_empty_job_list_is_valid() {
        let manifest = Manifest::from_yaml("jobs: []").unwrap();
        assert!(manifest.jobs.is_empty());
    }
}
