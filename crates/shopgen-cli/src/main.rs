mod config;
mod registry;

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use config::{ConfigError, ShopgenConfig};
use registry::{RunContext, init_logging, start_run, write_json, write_text};
use shopgen_generate::{GenerateOptions, GenerationEngine, GenerationError};
use shopgen_load::{LoadError, LoadReport, count_rows, create_schema, load_csv_dir, open_database};
use shopgen_report::{ReportError, build_report, render_report};
use sqlx::SqlitePool;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    #[error("report error: {0}")]
    Report(#[from] ReportError),
    #[error("database not found: {0}")]
    MissingDatabase(String),
}

#[derive(Parser, Debug)]
#[command(name = "shopgen", version, about = "Synthetic e-commerce dataset toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the dataset and export it as CSV into a new run directory.
    Generate(GenerateArgs),
    /// Load a directory of CSV files into a SQLite database.
    Ingest(IngestArgs),
    /// Print the 90-day customer order report.
    Query(QueryArgs),
    /// Generate, load the exported CSV files, then print the report.
    Pipeline(PipelineArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// TOML config file; flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerationArgs {
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    customers: Option<usize>,
    #[arg(long)]
    products: Option<usize>,
    #[arg(long)]
    orders: Option<usize>,
    /// Upper bound on generated reviews.
    #[arg(long)]
    reviews: Option<usize>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    start_date: Option<NaiveDate>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    end_date: Option<NaiveDate>,
    /// Parent directory for run directories.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Fail when the generated dataset breaks an integrity invariant.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Args, Debug)]
struct DatabaseArgs {
    /// SQLite database file.
    #[arg(long)]
    db: Option<PathBuf>,
    /// Keep an existing database file instead of deleting it first.
    #[arg(long, default_value_t = false)]
    keep_existing: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    generation: GenerationArgs,
}

#[derive(Args, Debug)]
struct IngestArgs {
    #[command(flatten)]
    config: ConfigArgs,
    /// Directory holding the `<table>.csv` files.
    #[arg(value_name = "CSV_DIR", default_value = ".")]
    csv_dir: PathBuf,
    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Args, Debug)]
struct QueryArgs {
    #[command(flatten)]
    config: ConfigArgs,
    /// SQLite database file.
    #[arg(long)]
    db: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PipelineArgs {
    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    generation: GenerationArgs,
    #[command(flatten)]
    database: DatabaseArgs,
}

impl GenerationArgs {
    fn apply(&self, config: &mut ShopgenConfig) {
        let generate = &mut config.generate;
        if let Some(seed) = self.seed {
            generate.seed = seed;
        }
        if let Some(customers) = self.customers {
            generate.customers = customers;
        }
        if let Some(products) = self.products {
            generate.products = products;
        }
        if let Some(orders) = self.orders {
            generate.orders = orders;
        }
        if let Some(reviews) = self.reviews {
            generate.reviews = reviews;
        }
        if let Some(start_date) = self.start_date {
            generate.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            generate.end_date = end_date;
        }
        if let Some(out) = &self.out {
            config.output.dir = out.clone();
        }
    }
}

impl DatabaseArgs {
    fn apply(&self, config: &mut ShopgenConfig) {
        if let Some(db) = &self.db {
            config.database.path = db.clone();
        }
        if self.keep_existing {
            config.database.reset = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Ingest(args) => run_ingest(args).await,
        Command::Query(args) => run_query(args).await,
        Command::Pipeline(args) => run_pipeline(args).await,
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let mut config = ShopgenConfig::load(args.config.config.as_deref())?;
    args.generation.apply(&mut config);
    config.generate.validate()?;

    let run_ctx = RunContext::new("generate", args.generation.strict, config);
    let run_paths = start_run(&run_ctx)?;
    init_logging(Some(&run_paths.logs_path))?;
    tracing::info!(event = "run_started", run_id = %run_ctx.run_id, command = "generate");

    let timer = Instant::now();
    let result = GenerationEngine::new(GenerateOptions {
        out_dir: run_paths.root.clone(),
        strict: run_ctx.strict,
        run_id: Some(run_ctx.run_id.clone()),
    })
    .run(&run_ctx.config.generate)?;

    for table in &result.report.tables {
        println!("{}: {} rows -> {}", table.table, table.rows, table.file);
    }
    println!("CSV files written to {}", run_paths.root.display());

    tracing::info!(
        event = "run_finished",
        status = "success",
        duration_ms = timer.elapsed().as_millis() as u64
    );
    Ok(())
}

async fn run_ingest(args: IngestArgs) -> Result<(), CliError> {
    let mut config = ShopgenConfig::load(args.config.config.as_deref())?;
    args.database.apply(&mut config);
    init_logging(None)?;

    let pool = prepare_database(&config).await?;
    let report = load_csv_dir(&pool, &args.csv_dir).await?;
    print_load_summary(&pool, &report, &config.database.path).await?;
    pool.close().await;
    Ok(())
}

async fn run_query(args: QueryArgs) -> Result<(), CliError> {
    let mut config = ShopgenConfig::load(args.config.config.as_deref())?;
    if let Some(db) = args.db {
        config.database.path = db;
    }
    init_logging(None)?;

    if !config.database.path.exists() {
        return Err(CliError::MissingDatabase(
            config.database.path.display().to_string(),
        ));
    }

    let pool = open_database(&config.database.path, false).await?;
    let report = build_report(&pool, today()).await?;
    print!("{}", render_report(&report));
    pool.close().await;
    Ok(())
}

async fn run_pipeline(args: PipelineArgs) -> Result<(), CliError> {
    let mut config = ShopgenConfig::load(args.config.config.as_deref())?;
    args.generation.apply(&mut config);
    args.database.apply(&mut config);
    config.generate.validate()?;

    let run_ctx = RunContext::new("pipeline", args.generation.strict, config);
    let run_paths = start_run(&run_ctx)?;
    init_logging(Some(&run_paths.logs_path))?;
    tracing::info!(event = "run_started", run_id = %run_ctx.run_id, command = "pipeline");

    let timer = Instant::now();
    GenerationEngine::new(GenerateOptions {
        out_dir: run_paths.root.clone(),
        strict: run_ctx.strict,
        run_id: Some(run_ctx.run_id.clone()),
    })
    .run(&run_ctx.config.generate)?;

    let pool = prepare_database(&run_ctx.config).await?;
    let load_report = load_csv_dir(&pool, &run_paths.root).await?;
    write_json(&run_paths.root.join("load_report.json"), &load_report)?;
    print_load_summary(&pool, &load_report, &run_ctx.config.database.path).await?;

    let report = build_report(&pool, today()).await?;
    let rendered = render_report(&report);
    write_text(&run_paths.root.join("report.txt"), &rendered)?;
    println!();
    print!("{rendered}");
    pool.close().await;

    tracing::info!(
        event = "run_finished",
        status = "success",
        duration_ms = timer.elapsed().as_millis() as u64
    );
    Ok(())
}

async fn prepare_database(config: &ShopgenConfig) -> Result<SqlitePool, CliError> {
    let pool = open_database(&config.database.path, config.database.reset).await?;
    create_schema(&pool).await?;
    Ok(pool)
}

async fn print_load_summary(
    pool: &SqlitePool,
    report: &LoadReport,
    db_path: &Path,
) -> Result<(), CliError> {
    let rule = "=".repeat(50);
    println!("{rule}");
    println!("Data Summary:");
    println!("{rule}");
    for (table, count) in count_rows(pool).await? {
        println!("{table}: {count} rows");
    }
    if report.rows_rejected() > 0 {
        println!("Rejected rows: {}", report.rows_rejected());
    }
    println!("{rule}");
    println!("Database '{}' populated", db_path.display());
    Ok(())
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
