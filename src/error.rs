//! Top-level error type for a run.
//!
//! Every kind is fatal: failures propagate to `main`, are logged, and
//! terminate the process with the kind's exit code. There is no per-row or
//! per-batch recovery. Malformed rows are not an error at all - they are
//! coerced by the normalizer, so one bad record cannot abort a file.

use ingest_core::ManifestError;
use std::path::PathBuf;

/// Fatal failure kinds, each with a distinct process exit code.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The job manifest could not be read or parsed
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The PostgreSQL connection could not be established
    #[error("failed to connect to PostgreSQL: {0}")]
    Connection(#[source] tokio_postgres::Error),

    /// A job's source file does not exist (missing files are not fetched)
    #[error("source file not found: {}", path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store rejected a bulk submission; the enclosing transaction is
    /// rolled back and the run aborts
    #[error("bulk copy into {schema}.{table} failed: {source}")]
    BulkSubmission {
        schema: String,
        table: String,
        #[source]
        source: tokio_postgres::Error,
    },

    /// A PostgREST request failed
    #[error("PostgREST request failed: {0}")]
    Api(#[from] reqwest::Error),

    /// Any other I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IngestError {
    /// Process exit code for this failure kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            IngestError::Io(_) => 1,
            IngestError::Manifest(_) => 2,
            IngestError::Connection(_) => 3,
            IngestError::MissingFile { .. } => 4,
            IngestError::BulkSubmission { .. } => 5,
            IngestError::Api(_) => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        let missing = IngestError::MissingFile {
            path: PathBuf::from("data/absent.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let io = IngestError::Io(std::io::Error::other("disk"));
        assert_eq!(missing.exit_code(), 4);
        assert_eq!(io.exit_code(), 1);
        assert_ne!(missing.exit_code(), io.exit_code());
    }

    #[test]
    fn test_missing_file_message_names_the_path() {
        let err = IngestError::MissingFile {
            path: PathBuf::from("data/absent.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "source file not found: data/absent.txt");
    }
}
