//! PostgreSQL sink for tsv-ingest.
//!
//! This crate owns the write side of the pipeline: establishing the single
//! connection a run uses, and submitting batches of normalized rows through
//! the `COPY ... FROM STDIN` protocol, one transaction commit per
//! submission.

mod connect;
mod copy;

pub use connect::{postgres_connect, PostgresOpts};
pub use copy::{copy_rows, copy_statement, encode_payload};
