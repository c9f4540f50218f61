//! `cardkit` command-line entry point.
//!
//! Usage:
//! ```bash
//! # Create or migrate a store
//! cardkit init-db --db site.sqlite3
//!
//! # Load rows from a JSON array into one table
//! cardkit import --db site.sqlite3 --table team_members --json team.json
//!
//! # Render a collection from the store, or straight from a JSON fixture
//! cardkit render --kind team-member --db site.sqlite3 --out team.html
//! cardkit render --kind event --json collections.json --now 2024-06-01T12:00:00Z
//! ```

use anyhow::{bail, Context, Result};
use cardkit_core::{
    db::{import_rows, open_db, open_existing_db},
    default_log_level, init_logging, CardKind, CollectionService, HtmlContainer, LoadOutcome,
    Record, RecordSource, RenderOptions, SqliteRecordSource, StaticRecordSource,
};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "cardkit",
    version,
    about = "Render untrusted site collections into safe HTML cards",
    long_about = "Stores event, activity and team-member rows in SQLite and renders them into HTML fragments that are safe to insert into a page."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "CARDKIT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotated log files (stderr when omitted)
    #[arg(long, global = true, env = "CARDKIT_LOG_DIR")]
    log_dir: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Create a store, or migrate an existing one to the latest schema
    InitDb {
        #[arg(long)]
        db: PathBuf,
    },

    /// Import a JSON array of row objects into a table of an existing store
    Import {
        #[arg(long)]
        db: PathBuf,

        /// Target table, e.g. `upcoming_events`
        #[arg(long)]
        table: String,

        #[arg(long)]
        json: PathBuf,
    },

    /// Render one collection into its page container
    Render {
        #[arg(long, value_enum)]
        kind: KindArg,

        /// Read rows from this SQLite store
        #[arg(long, conflicts_with = "json", required_unless_present = "json")]
        db: Option<PathBuf>,

        /// Read rows from a JSON object of `table -> [row, ...]`
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the fragment here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// JSON file with render options
        #[arg(long)]
        options: Option<PathBuf>,

        /// Reference time for relative ages, RFC 3339 (defaults to now)
        #[arg(long)]
        now: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Event,
    Activity,
    TeamMember,
}

impl From<KindArg> for CardKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Event => Self::Event,
            KindArg::Activity => Self::Activity,
            KindArg::TeamMember => Self::TeamMember,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, cli.log_dir.as_deref())
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    match cli.command {
        Command::InitDb { db } => init_db(&db),
        Command::Import { db, table, json } => import(&db, &table, &json),
        Command::Render {
            kind,
            db,
            json,
            out,
            options,
            now,
        } => render(
            kind.into(),
            RenderInput::from_args(db, json)?,
            out.as_deref(),
            options.as_deref(),
            now.as_deref(),
        ),
    }
}

fn init_db(db: &Path) -> Result<()> {
    open_db(db).with_context(|| format!("failed to open store `{}`", db.display()))?;
    println!("store ready: {}", db.display());
    Ok(())
}

fn import(db: &Path, table: &str, json: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(json)
        .with_context(|| format!("failed to read `{}`", json.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("`{}` is not valid JSON", json.display()))?;
    let rows = parse_rows(value)?;

    let mut conn = open_existing_db(db)
        .with_context(|| format!("failed to open store `{}`", db.display()))?;
    let inserted = import_rows(&mut conn, table, &rows)
        .with_context(|| format!("failed to import into `{table}`"))?;
    println!("imported {inserted} row(s) into {table}");
    Ok(())
}

fn parse_rows(value: Value) -> Result<Vec<Record>> {
    let Value::Array(rows) = value else {
        bail!("expected a JSON array of row objects");
    };
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            Record::from_value(row).with_context(|| format!("row #{index} is not an object"))
        })
        .collect()
}

enum RenderInput {
    Db(PathBuf),
    Json(PathBuf),
}

impl RenderInput {
    fn from_args(db: Option<PathBuf>, json: Option<PathBuf>) -> Result<Self> {
        match (db, json) {
            (Some(db), None) => Ok(Self::Db(db)),
            (None, Some(json)) => Ok(Self::Json(json)),
            _ => bail!("exactly one of --db or --json is required"),
        }
    }
}

fn render(
    kind: CardKind,
    input: RenderInput,
    out: Option<&Path>,
    options: Option<&Path>,
    now: Option<&str>,
) -> Result<()> {
    let options = match options {
        Some(path) => RenderOptions::from_json_file(path)
            .with_context(|| format!("failed to load options `{}`", path.display()))?,
        None => RenderOptions::default(),
    };
    let now = parse_now(now)?;

    let document = match input {
        RenderInput::Db(path) => {
            let conn = open_existing_db(&path)
                .with_context(|| format!("failed to open store `{}`", path.display()))?;
            render_document(SqliteRecordSource::new(&conn), kind, options, now)
        }
        RenderInput::Json(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read `{}`", path.display()))?;
            let source = StaticRecordSource::from_json_str(&raw)
                .with_context(|| format!("failed to load collections from `{}`", path.display()))?;
            render_document(source, kind, options, now)
        }
    };

    match out {
        Some(path) => std::fs::write(path, document)
            .with_context(|| format!("failed to write `{}`", path.display()))?,
        None => print!("{document}"),
    }
    Ok(())
}

fn render_document<S: RecordSource>(
    source: S,
    kind: CardKind,
    options: RenderOptions,
    now: DateTime<Utc>,
) -> String {
    let service = CollectionService::new(source, options);
    let mut container = HtmlContainer::new(kind.container_id());
    let outcome = service.load(kind, &mut container, now);
    if outcome == LoadOutcome::Failed {
        // The container already shows the failure placeholder.
        info!(
            "event=cli_render module=cli status=degraded kind={}",
            kind.as_str()
        );
    }
    container.to_document_fragment()
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .with_context(|| format!("--now `{raw}` is not an RFC 3339 timestamp")),
        None => Ok(Utc::now()),
    }
}
