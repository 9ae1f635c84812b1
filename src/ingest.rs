//! The ingestion driver.
//!
//! Owns the per-table loop: open the source file, parse the header, feed
//! lines through normalizer and batcher, and submit each flushed batch
//! through the COPY sink. Jobs run strictly in order over one shared
//! connection; the first unrecovered error aborts the run and the
//! connection is released by ownership on every exit path.

use crate::error::IngestError;
use ingest_core::{Batcher, DelimiterPolicy, Header, Job, RowNormalizer};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tokio_postgres::Client;
use tracing::{debug, info, warn};

/// Run-wide ingestion settings, constructed once at startup and passed by
/// reference into the driver. No global mutable state.
#[derive(Clone, Debug)]
pub struct IngestConfig {
    /// Directory containing the `<file>.txt` extracts; created if missing
    /// (missing files are never fetched)
    pub data_dir: PathBuf,

    /// Schema the target tables live in
    pub schema: String,

    /// Commit granularity: rows per COPY submission, 1 meaning per-row
    /// streaming commit
    pub batch_size: usize,

    /// How data rows are split into fields
    pub delimiter_policy: DelimiterPolicy,

    /// Log flushes instead of submitting them
    pub dry_run: bool,
}

/// Process every job in order over one shared connection.
///
/// Returns the total number of rows submitted across all jobs.
pub async fn run(
    client: &mut Client,
    config: &IngestConfig,
    jobs: &[Job],
) -> Result<u64, IngestError> {
    if !config.data_dir.exists() {
        fs::create_dir_all(&config.data_dir)?;
    }

    if config.dry_run {
        warn!("Running in dry-run mode - no data will be written");
    }

    let mut total = 0;
    for job in jobs {
        total += load_file(client, config, job).await?;
    }

    Ok(total)
}

/// Ingest one job's source file into its target table.
async fn load_file(
    client: &mut Client,
    config: &IngestConfig,
    job: &Job,
) -> Result<u64, IngestError> {
    let path = job.source_path(&config.data_dir);
    info!(
        "Loading data into {}.{} from {}",
        config.schema,
        job.table,
        path.display()
    );

    let file = File::open(&path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::MissingFile {
                path: path.clone(),
                source,
            }
        } else {
            IngestError::Io(source)
        }
    })?;
    let mut lines = BufReader::new(file).lines();

    // The first line is the header and fixes the arity for the whole file.
    let header = match lines.next() {
        Some(line) => Header::parse(&line?),
        None => {
            warn!("Source file {} is empty, skipping", path.display());
            return Ok(0);
        }
    };
    debug!("Header columns: {:?}", header.columns());

    let normalizer = RowNormalizer::new(config.delimiter_policy, header.arity());
    let mut batcher = Batcher::new(config.batch_size);
    let mut submitted = 0;

    for line in lines {
        let row = normalizer.normalize(&line?);
        if let Some(batch) = batcher.push(row) {
            submitted += submit(client, config, job, &header, &batch).await?;
        }
    }

    // Residual partial batch at end-of-file.
    if let Some(batch) = batcher.finish() {
        submitted += submit(client, config, job, &header, &batch).await?;
    }

    info!(
        "Loaded {} rows into {}.{}",
        submitted, config.schema, job.table
    );
    Ok(submitted)
}

/// Submit one flushed batch and commit, or log it in dry-run mode.
async fn submit(
    client: &mut Client,
    config: &IngestConfig,
    job: &Job,
    header: &Header,
    batch: &[Vec<String>],
) -> Result<u64, IngestError> {
    if config.dry_run {
        debug!(
            "Dry run: would copy batch of {} rows into {}.{}",
            batch.len(),
            config.schema,
            job.table
        );
        return Ok(batch.len() as u64);
    }

    postgres_sink::copy_rows(client, &config.schema, &job.table, header.columns(), batch)
        .await
        .map_err(|source| IngestError::BulkSubmission {
            schema: config.schema.clone(),
            table: job.table.clone(),
            source,
        })
}
