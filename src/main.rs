//! Command-line interface for tsv-ingest
//!
//! # Usage Examples
//!
//! ## Ingestion
//! ```bash
//! # Buffered batch commit (multi-space-or-tab delimited extracts)
//! tsv-ingest load batch \
//!   --manifest ingest.yaml --data-dir data \
//!   --postgres-db statistics --postgres-password secret
//!
//! # Per-row streaming commit (strictly tab-delimited extracts)
//! tsv-ingest load stream \
//!   --postgres-db statistics --postgres-password secret
//!
//! # Rehearse a load without writing anything
//! tsv-ingest load batch --dry-run --postgres-db statistics
//! ```
//!
//! ## API tools
//! ```bash
//! # Spot-check ingested tables through PostgREST
//! tsv-ingest query /women_in_government_v1 /ratio_production_supervisory
//!
//! # Provision the PostgREST JWT secret in .env
//! tsv-ingest generate-jwt-secret
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use ingest_core::{DelimiterPolicy, Manifest};
use postgres_sink::{postgres_connect, PostgresOpts};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tsv_ingest::ingest::{self, IngestConfig};
use tsv_ingest::{api, secret, IngestError, PostgresArgs, PostgrestArgs};

#[derive(Parser)]
#[command(name = "tsv-ingest")]
#[command(about = "A tool for bulk-loading delimited text extracts into PostgreSQL")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Ingestion operating mode.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Buffered commits of up to 2000 rows; rows split on two-or-more
    /// spaces or tabs
    Batch,
    /// One commit per row; rows split on tabs only
    Stream,
}

impl Mode {
    fn delimiter_policy(self) -> DelimiterPolicy {
        match self {
            Mode::Batch => DelimiterPolicy::MultiSpaceOrTab,
            Mode::Stream => DelimiterPolicy::TabOnly,
        }
    }

    fn default_batch_size(self) -> usize {
        match self {
            Mode::Batch => 2000,
            Mode::Stream => 1,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load every manifest job's source file into its target table
    Load {
        /// Operating mode
        #[arg(value_enum)]
        mode: Mode,

        /// PostgreSQL connection options
        #[command(flatten)]
        postgres: PostgresArgs,

        /// Path to the YAML job manifest
        #[arg(long, default_value = "ingest.yaml")]
        manifest: PathBuf,

        /// Directory containing the source .txt extracts
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Rows per commit (default: 2000 for batch mode, 1 for stream mode)
        #[arg(long)]
        batch_size: Option<usize>,

        /// Run the pipeline without writing any data
        #[arg(long)]
        dry_run: bool,
    },

    /// Fetch PostgREST endpoints and log the responses (read-only)
    Query {
        /// PostgREST server options
        #[command(flatten)]
        postgrest: PostgrestArgs,

        /// Endpoints to fetch, e.g. /women_in_government_v1
        #[arg(required = true)]
        endpoints: Vec<String>,
    },

    /// Generate a PostgREST JWT secret and record it in the env file
    GenerateJwtSecret {
        /// Env file to update
        #[arg(long, default_value = ".env")]
        env_file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tsv_ingest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), IngestError> {
    match cli.command {
        Commands::Load {
            mode,
            postgres,
            manifest,
            data_dir,
            batch_size,
            dry_run,
        } => {
            let manifest = Manifest::load(&manifest)?;

            let opts = PostgresOpts::from(&postgres);
            info!(
                "Connecting to PostgreSQL database at {}:{}/{}",
                opts.host, opts.port, opts.dbname
            );
            let mut client = postgres_connect(&opts)
                .await
                .map_err(IngestError::Connection)?;

            let config = IngestConfig {
                data_dir,
                schema: postgres.postgres_schema.clone(),
                batch_size: batch_size.unwrap_or_else(|| mode.default_batch_size()),
                delimiter_policy: mode.delimiter_policy(),
                dry_run,
            };

            let total = ingest::run(&mut client, &config, &manifest.jobs).await?;
            info!("Data ingestion completed, {total} rows loaded");

            drop(client);
            info!("Connection to PostgreSQL database closed");
            Ok(())
        }

        Commands::Query {
            postgrest,
            endpoints,
        } => {
            api::query_endpoints(&postgrest, &endpoints).await?;
            Ok(())
        }

        Commands::GenerateJwtSecret { env_file } => {
            let jwt_secret = secret::generate_jwt_secret();
            if secret::update_env_file(&env_file, &jwt_secret)? {
                info!(
                    "JWT secret generated and recorded in {}",
                    env_file.display()
                );
            } else {
                info!(
                    "JWT secret already present in {}, leaving it unchanged",
                    env_file.display()
                );
            }
            Ok(())
        }
    }
}
