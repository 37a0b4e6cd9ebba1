mod parser;
mod render;
mod settings;
mod source;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use parser::header::{self, MappingKind};
use parser::SearchKey;
use settings::Settings;
use source::{Document, JsonSource, TableSource};

#[derive(Parser)]
#[command(name = "schedule_finder", about = "Find an instructor's classes in a tabulated schedule")]
struct Cli {
    /// Settings file (default: ./schedule_finder.{toml,json,yaml} if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the classes of one instructor
    Find {
        /// Surname, optionally with initials ("Петров И.И.")
        key: String,
        /// Tables as JSON ("-" for stdin)
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long, value_enum, default_value = "message")]
        format: render::Format,
    },
    /// Show how each table's header and rows are understood
    Inspect {
        /// Tables as JSON ("-" for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    info!(max_slots = settings.max_slots, min_table_rows = settings.min_table_rows, "settings loaded");

    let result = match cli.command {
        Commands::Find { key, input, format } => {
            let key = SearchKey::parse(&key).context("search key is blank")?;
            let doc = JsonSource::from_path(&input).load()?;
            let entries = parser::walk_document(&doc, &key, &settings);
            info!(
                key = key.as_str(),
                pages = doc.pages.len(),
                tables = doc.table_count(),
                entries = entries.len(),
                "document walked"
            );
            if entries.is_empty() {
                println!("No classes found for {}.", key.as_str());
            } else {
                println!("{}", render::render(&entries, format)?);
            }
            Ok(())
        }
        Commands::Inspect { input } => {
            let doc = JsonSource::from_path(&input).load()?;
            inspect(&doc, &settings);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn inspect(doc: &Document, settings: &Settings) {
    for (p, page) in doc.pages.iter().enumerate() {
        for (t, table) in page.tables.iter().enumerate() {
            print!("page {} table {}: {} rows", p + 1, t + 1, table.len());
            if table.len() < settings.min_table_rows {
                println!(" (skipped, fewer than {})", settings.min_table_rows);
                continue;
            }

            let resolved = header::resolve(table, settings.max_slots);
            let header_row = resolved
                .header_row
                .map(|i| i.to_string())
                .unwrap_or_else(|| "none".into());
            let kind = match resolved.mapping.kind() {
                MappingKind::Header => "header",
                MappingKind::Positional => "positional",
            };
            let pairs: Vec<String> = resolved
                .mapping
                .iter()
                .map(|(col, slot)| format!("{}→{}", col, slot))
                .collect();
            let groups = table
                .rows
                .iter()
                .skip(resolved.data_start())
                .filter(|row| parser::walker::group_code(row).is_some())
                .count();

            println!(", header row {}, {} mapping [{}], {} group rows", header_row, kind, pairs.join(" "), groups);
        }
    }
}
