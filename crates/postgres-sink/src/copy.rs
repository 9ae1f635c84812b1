//! COPY-based bulk loading.
//!
//! A batch is serialized into the tab-delimited payload of a
//! `COPY ... FROM STDIN` command and submitted in one round trip; the
//! enclosing transaction commits immediately on success. The command
//! declares the empty string as the NULL sentinel, so a genuinely empty
//! field is indistinguishable from a NULL in the target column. That
//! ambiguity is inherent to the format; downstream consumers rely on it.

use bytes::Bytes;
use futures::{pin_mut, SinkExt};
use tokio_postgres::Client;
use tracing::debug;

/// Build the COPY command targeting `schema.table (col1, col2, ...)`.
pub fn copy_statement(schema: &str, table: &str, columns: &[String]) -> String {
    format!(
        "COPY {}.{} ({}) FROM STDIN WITH CSV DELIMITER E'\\t' NULL AS ''",
        schema,
        table,
        columns.join(", ")
    )
}

/// Serialize a batch into the COPY payload: fields joined with tabs, rows
/// joined with newlines, terminated by a trailing newline.
pub fn encode_payload(rows: &[Vec<String>]) -> String {
    let mut payload = String::new();
    for row in rows {
        payload.push_str(&row.join("\t"));
        payload.push('\n');
    }
    payload
}

/// Submit one batch (or single row) and commit.
///
/// Any failure - malformed payload, constraint violation, connectivity
/// loss - rolls the whole submission back when the transaction drops; one
/// poisoned row fails the batch it is in. There is no partial-batch retry
/// or row-level isolation here. Callers choosing a batch size of 1 narrow
/// the blast radius to one row per commit at the cost of one round trip
/// per row.
pub async fn copy_rows(
    client: &mut Client,
    schema: &str,
    table: &str,
    columns: &[String],
    rows: &[Vec<String>],
) -> Result<u64, tokio_postgres::Error> {
    let statement = copy_statement(schema, table, columns);
    let payload = encode_payload(rows);

    let transaction = client.transaction().await?;
    let sink = transaction.copy_in(&statement).await?;
    pin_mut!(sink);
    sink.send(Bytes::from(payload.into_bytes())).await?;
    let written = sink.finish().await?;
    transaction.commit().await?;

    debug!("Copied {written} rows into {schema}.{table}");
    Ok(written)
}
