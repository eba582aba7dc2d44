//! CLI tool for extracting slide segments and syncing text edits back into
//! presentations.

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use slidesync_core::{
    presentation_text, runs_template, summarize, CustomizationGate, EditPayload, JsonFileStore,
    Presentation, SyncEngine, SyncOptions,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Extract slide text segments and compile edits into batch update requests.
#[derive(Parser, Debug)]
#[command(name = "slidesync")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the segment map of a presentation as JSON
    Extract(ReadArgs),
    /// Print the runs-only edit template of a presentation as JSON
    Template(ReadArgs),
    /// Print a presentation's shapes with their text and order
    Shapes(ReadArgs),
    /// Print a presentation's plain text
    Text(ReadArgs),
    /// Compile edits into batch update requests and print them
    Compile {
        #[command(flatten)]
        read: ReadArgs,

        /// Edit payload (JSON, runs-only segment map)
        edits: PathBuf,

        #[command(flatten)]
        sync: SyncArgs,
    },
    /// Fetch a document from a store directory, compile edits, and submit them
    Sync {
        /// Store directory holding <DOCUMENT_ID>.json files
        #[arg(long)]
        store: PathBuf,

        /// Document to update
        document_id: String,

        /// Edit payload (JSON, runs-only segment map)
        edits: PathBuf,

        /// Only use this page (slide object id)
        #[arg(long)]
        page: Option<String>,

        #[command(flatten)]
        sync: SyncArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct ReadArgs {
    /// Presentation JSON file
    presentation: PathBuf,

    /// Only use this page (slide object id)
    #[arg(long)]
    page: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct SyncArgs {
    /// Which shapes consult their customization flag
    #[arg(long, value_enum, default_value = "all")]
    gate: Gate,

    /// Keep the trailing line break of each container's last run
    #[arg(long)]
    keep_final_newline: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Gate {
    Ignore,
    TextOnly,
    All,
}

impl From<Gate> for CustomizationGate {
    fn from(gate: Gate) -> Self {
        match gate {
            Gate::Ignore => CustomizationGate::Ignore,
            Gate::TextOnly => CustomizationGate::TextOnly,
            Gate::All => CustomizationGate::All,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match &args.command {
        Command::Extract(read) => {
            let options = sync_options(read.page.as_deref(), None);
            let map = SyncEngine::new(options).extract(&read_presentation(&read.presentation)?)?;
            print_json(&map)
        }
        Command::Template(read) => {
            let options = sync_options(read.page.as_deref(), None);
            let map = SyncEngine::new(options).extract(&read_presentation(&read.presentation)?)?;
            print_json(&runs_template(&map))
        }
        Command::Shapes(read) => {
            let pages = summarize(&read_presentation(&read.presentation)?, read.page.as_deref())?;
            print_json(&pages)
        }
        Command::Text(read) => {
            let text = presentation_text(&read_presentation(&read.presentation)?, read.page.as_deref())?;
            println!("{}", text);
            Ok(())
        }
        Command::Compile { read, edits, sync } => {
            let engine = SyncEngine::new(sync_options(read.page.as_deref(), Some(sync)));
            let presentation = read_presentation(&read.presentation)?;
            let requests = engine.plan(&presentation, &read_edits(edits)?)?;
            if args.verbose {
                eprintln!("Compiled {} requests", requests.len());
            }
            print_json(&serde_json::json!({ "requests": requests }))
        }
        Command::Sync {
            store,
            document_id,
            edits,
            page,
            sync,
        } => {
            let engine = SyncEngine::new(sync_options(page.as_deref(), Some(sync)));
            let mut store = JsonFileStore::new(store);
            let report = engine
                .synchronize(&mut store, document_id, &read_edits(edits)?)
                .with_context(|| format!("Failed to synchronize {}", document_id))?;

            if report.submitted() {
                eprintln!(
                    "Submitted {} requests for {} containers to {}",
                    report.requests.len(),
                    report.containers,
                    store.batch_path(document_id).display()
                );
            } else {
                eprintln!("No updates to perform");
            }
            Ok(())
        }
    }
}

/// Build engine options from command-line flags.
fn sync_options(page: Option<&str>, sync: Option<&SyncArgs>) -> SyncOptions {
    let mut options = SyncOptions::new();
    if let Some(page) = page {
        options = options.with_page(page);
    }
    if let Some(sync) = sync {
        options = options
            .with_customization_gate(sync.gate.into())
            .with_trim_final_newline(!sync.keep_final_newline);
    }
    options
}

/// Read a presentation, accepting either the bare resource or an API
/// response envelope with a `data` field.
fn read_presentation(path: &Path) -> Result<Presentation> {
    let value = read_json(path)?;
    let value = match value {
        Value::Object(mut object) if object.contains_key("data") && !object.contains_key("slides") => {
            object.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(value).with_context(|| format!("Invalid presentation in {}", path.display()))
}

fn read_edits(path: &Path) -> Result<EditPayload> {
    serde_json::from_value(read_json(path)?).with_context(|| format!("Invalid edit payload in {}", path.display()))
}

fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to open {}", path.display()))?;
    log::debug!("Read {} bytes from {}", content.len(), path.display());
    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
