//! Core types for the tsv-ingest pipeline.
//!
//! This crate provides the database-independent pieces of the ingestion
//! pipeline:
//!
//! - [`Header`] - column names parsed from the first line of a source file
//! - [`RowNormalizer`] - coerces raw lines to the header's column count
//! - [`Batcher`] - groups normalized rows into commit batches
//! - [`Manifest`] - the ordered list of (table, file) ingestion jobs
//!
//! # Architecture
//!
//! ```text
//! ingest-core (this crate)
//!    │
//!    └─── tsv-ingest   (CLI driver feeding files through the pipeline
//!                       and submitting flushed batches via postgres-sink)
//! ```
//!
//! Everything here operates on plain strings. Values are never typed or
//! validated beyond column-count normalization; the target tables decide
//! what a field means.

pub mod batch;
pub mod manifest;
pub mod row;

pub use batch::Batcher;
pub use manifest::{Job, Manifest, ManifestError};
pub use row::{DelimiterPolicy, Header, RowNormalizer};
