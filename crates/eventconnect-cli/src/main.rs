//! One-shot batch importer for eventconnect.
//!
//! Reads a local JSON file whose top-level `items` array holds event records,
//! derives one target document per record, and creates it in the configured
//! Firestore collection. A failure on one item is logged and the batch
//! continues; startup failures (unreadable input, bad credentials) abort
//! before any item is processed.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use eventconnect_core::event::{EventDocument, SourceEvent, FALLBACK_LABEL};
use eventconnect_core::ImportReport;
use eventconnect_firestore::{EventSink, FirestoreEventSink, NoopEventSink};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the service account credentials file
    #[arg(long, default_value = "serviceAccountKey.json")]
    credentials: PathBuf,

    /// Path to the JSON file holding the events to import
    #[arg(long, default_value = "events.json")]
    input: PathBuf,

    /// Collection the documents are created in
    #[arg(long, default_value = "events")]
    collection: String,

    /// Map and log every item without opening a store connection
    #[arg(long)]
    dry_run: bool,
}

/// Top-level shape of the input file. A missing `items` field is an empty
/// batch. Items stay raw JSON here and are decoded one at a time, so a
/// malformed record fails that item instead of the whole file.
#[derive(Deserialize, Debug)]
struct EventsFile {
    #[serde(default)]
    items: Vec<Value>,
}

fn load_items(path: &Path) -> Result<Vec<Value>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open input file {}", path.display()))?;
    let parsed: EventsFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse input file {}", path.display()))?;
    Ok(parsed.items)
}

/// Name to report a record under before it has been decoded. Only a missing
/// or non-text `name` falls back; an empty one is reported as-is.
fn item_label(raw: &Value) -> &str {
    raw.get("name")
        .and_then(Value::as_str)
        .unwrap_or(FALLBACK_LABEL)
}

async fn import_one(sink: &dyn EventSink, raw: &Value) -> Result<String> {
    let source: SourceEvent =
        serde_json::from_value(raw.clone()).context("Invalid event record")?;
    let doc = EventDocument::from_source(&source);
    let title = doc.title.clone();
    sink.create_event(&doc).await?;
    Ok(title)
}

/// Processes the batch strictly in input order, one line of console output
/// per item. No item outcome affects any other item.
async fn import_events(sink: &dyn EventSink, items: &[Value]) -> ImportReport {
    let mut report = ImportReport::default();

    for raw in items {
        match import_one(sink, raw).await {
            Ok(title) => {
                println!("✅ Uploaded: {title}");
                report.record_success();
            }
            Err(err) => {
                eprintln!("❌ Failed to upload: {} — {err:#}", item_label(raw));
                report.record_failure();
            }
        }
    }

    report
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let items = load_items(&cli.input)?;

    let sink: Box<dyn EventSink> = if cli.dry_run {
        Box::new(NoopEventSink)
    } else {
        Box::new(
            FirestoreEventSink::connect(&cli.credentials, &cli.collection)
                .await
                .context("Failed to connect to Firestore")?,
        )
    };

    let report = import_events(sink.as_ref(), &items).await;

    // An empty batch stays silent; per-item failures never change the exit code.
    if report.total() > 0 {
        println!(
            "Done: {} uploaded, {} failed.",
            report.succeeded, report.failed
        );
    }

    Ok(())
}
