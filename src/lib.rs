//! tsv-ingest library
//!
//! Bulk-loads header-delimited text extracts into PostgreSQL through the
//! `COPY ... FROM STDIN` protocol.
//!
//! # Features
//!
//! - Batch mode: buffered commits of up to 2000 rows per COPY round trip,
//!   tolerating multi-space-padded fixed-width source files
//! - Streaming mode: one commit per row for strictly tab-delimited files,
//!   narrowing the blast radius of a poisoned record to a single row
//! - Permissive row coercion: ragged rows are padded to the header's
//!   column count instead of aborting the load
//! - Read-only PostgREST query tool and JWT-secret provisioning for the
//!   API layer that sits on top of the ingested tables
//!
//! # CLI Usage
//!
//! ```bash
//! # Buffered batch ingestion of every manifest job
//! tsv-ingest load batch --manifest ingest.yaml --postgres-db statistics
//!
//! # Per-row streaming commit
//! tsv-ingest load stream --postgres-db statistics
//!
//! # Spot-check the API
//! tsv-ingest query /women_in_government_v1
//! ```

use clap::Parser;

pub mod api;
pub mod error;
pub mod ingest;
pub mod secret;

pub use error::IngestError;
pub use ingest::IngestConfig;

/// PostgreSQL connection arguments, resolved from flags or the
/// environment (a `.env` file is honored at startup).
#[derive(Parser, Clone, Debug)]
pub struct PostgresArgs {
    /// PostgreSQL host
    #[arg(long, default_value = "localhost", env = "POSTGRES_HOST")]
    pub postgres_host: String,

    /// PostgreSQL port
    #[arg(long, default_value = "5432", env = "POSTGRES_PORT")]
    pub postgres_port: u16,

    /// PostgreSQL user
    #[arg(long, default_value = "postgres", env = "POSTGRES_USER")]
    pub postgres_user: String,

    /// PostgreSQL password
    #[arg(long, env = "POSTGRES_PASSWORD")]
    pub postgres_password: String,

    /// PostgreSQL database
    #[arg(long, env = "POSTGRES_DB")]
    pub postgres_db: String,

    /// Schema the target tables live in
    #[arg(long, default_value = "public", env = "POSTGRES_SCHEMA")]
    pub postgres_schema: String,
}

impl From<&PostgresArgs> for postgres_sink::PostgresOpts {
    fn from(args: &PostgresArgs) -> Self {
        Self {
            host: args.postgres_host.clone(),
            port: args.postgres_port,
            user: args.postgres_user.clone(),
            password: args.postgres_password.clone(),
            dbname: args.postgres_db.clone(),
        }
    }
}

/// PostgREST server arguments for the read-only query tool.
#[derive(Parser, Clone, Debug)]
pub struct PostgrestArgs {
    /// PostgREST host
    #[arg(long, default_value = "localhost", env = "POSTGREST_HOST")]
    pub postgrest_host: String,

    /// PostgREST port
    #[arg(long, default_value = "3000", env = "POSTGREST_PORT")]
    pub postgrest_port: u16,
}
