//! sumprep CLI
//!
//! Batch tool for cleaning summarization tables and formatting them into
//! fine-tuning datasets

mod config;
mod progress;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use sumprep_clean::TableCleaner;
use sumprep_formats::{JsonlReader, SourceKind, Table};
use sumprep_prep::{PreparedRecord, SourceRecord};
use sumprep_server::{AppState, OpenAiCompatModel};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::{CleanConfig, PipelineConfig};

#[derive(Parser)]
#[command(name = "sumprep")]
#[command(version, about = "Prepare text-summarization data for fine-tuning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output statistics in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a raw article/summary table
    Clean {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Column holding the article body
        #[arg(long, default_value = "article")]
        text_column: String,

        /// Column holding the reference summary
        #[arg(long, default_value = "highlights")]
        summary_column: String,

        /// Columns to drop before cleaning
        #[arg(long, value_delimiter = ',')]
        drop_columns: Vec<String>,

        /// Keep only this fraction of rows, seeded for reproducibility
        #[arg(long)]
        sample: Option<f64>,

        /// Remove exact duplicate rows
        #[arg(long)]
        dedup: bool,

        /// Remove rows with missing text
        #[arg(long)]
        drop_missing: bool,

        /// Apply the full text normalization to both text columns
        #[arg(long)]
        normalize: bool,

        /// Drop rows whose text exceeds this many words
        #[arg(long, default_value = "500")]
        max_words: usize,

        /// Show statistics without writing output
        #[arg(long)]
        dry_run: bool,
    },

    /// Extract {id, text, summary} records from a cleaned table
    Extract {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSONL file
        #[arg(short, long)]
        output: PathBuf,

        /// Column holding the article body
        #[arg(long, default_value = "article")]
        text_column: String,

        /// Column holding the reference summary
        #[arg(long, default_value = "highlights")]
        summary_column: String,
    },

    /// Attach the task and output scheme to extracted records
    Prepare {
        /// Input JSONL file of extracted records
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSONL file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Build shuffled fine-tuning examples and write train/val splits
    Format {
        /// Input JSONL file of prepared records
        #[arg(short, long)]
        input: PathBuf,

        /// Directory receiving train.json and val.json
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Size of the positional training slice
        #[arg(long, default_value = "3000")]
        train_size: usize,

        /// Size of the positional validation slice
        #[arg(long, default_value = "500")]
        val_size: usize,

        /// Also dump every formatted example as JSONL
        #[arg(long)]
        full_output: Option<PathBuf>,
    },

    /// Run clean, extract, prepare, and format from a config file
    Pipeline {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Directory receiving all stage outputs
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Pipeline config file (YAML or TOML)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Peek at records of a CSV/JSONL file
    Inspect {
        /// Path to the dataset file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of records to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Count records in a CSV/JSONL file
    Count {
        /// Path to the dataset file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Serve the summarization model over HTTP
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: String,

        /// Base URL of the OpenAI-compatible backend
        #[arg(long, default_value = "http://127.0.0.1:8080/v1")]
        base_url: String,

        /// API key for the backend
        #[arg(long, env = "SUMPREP_API_KEY")]
        api_key: Option<String>,

        /// Model id requested from the backend
        #[arg(long, default_value = "Qwen/Qwen2.5-0.5B-Instruct")]
        model: String,

        /// Sampling temperature
        #[arg(long, default_value = "0.2")]
        temperature: f32,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_ansi(!cli.json)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Clean {
            input,
            output,
            text_column,
            summary_column,
            drop_columns,
            sample,
            dedup,
            drop_missing,
            normalize,
            max_words,
            dry_run,
        } => {
            let options = CleanConfig {
                text_column,
                summary_column,
                drop_columns,
                sample_fraction: sample,
                dedup,
                drop_missing,
                normalize,
                max_words,
            };
            run_clean(&input, Some(&output), &options, dry_run, cli.json)?;
        }
        Commands::Extract {
            input,
            output,
            text_column,
            summary_column,
        } => {
            run_extract(&input, &output, &text_column, &summary_column)?;
        }
        Commands::Prepare { input, output } => {
            run_prepare(&input, &output)?;
        }
        Commands::Format {
            input,
            out_dir,
            train_size,
            val_size,
            full_output,
        } => {
            run_format(&input, &out_dir, train_size, val_size, full_output.as_deref())?;
        }
        Commands::Pipeline {
            input,
            out_dir,
            config,
        } => {
            run_pipeline(&input, &out_dir, &config, cli.json)?;
        }
        Commands::Inspect { input, limit } => {
            inspect_dataset(&input, limit)?;
        }
        Commands::Count { input } => {
            count_dataset(&input, cli.json)?;
        }
        Commands::Serve {
            addr,
            base_url,
            api_key,
            model,
            temperature,
        } => {
            let backend = OpenAiCompatModel::new(base_url, api_key, model, temperature);
            sumprep_server::serve(AppState::new(Arc::new(backend)), &addr).await?;
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

/// Run the cleaning stages and return the cleaned table.
fn run_clean(
    input: &Path,
    output: Option<&Path>,
    options: &CleanConfig,
    dry_run: bool,
    json_output: bool,
) -> Result<Table> {
    info!("Starting table cleaning");
    info!("  Input: {:?}", input);
    if let Some(output) = output {
        info!("  Output: {:?}", output);
    }

    let table = sumprep_formats::load_csv(input)
        .with_context(|| format!("failed to load {}", input.display()))?;
    let total = table.len();

    let mut cleaner = TableCleaner::new(table, &options.text_column, &options.summary_column);

    if !options.drop_columns.is_empty() {
        cleaner.remove_columns(&options.drop_columns);
    }

    let mut remaining = total;
    let mut sampled_out = 0;
    if let Some(fraction) = options.sample_fraction {
        cleaner.subsample(fraction)?;
        sampled_out = remaining - cleaner.table().len();
        remaining = cleaner.table().len();
    }

    let mut duplicates = 0;
    if options.dedup {
        cleaner.remove_duplicate_rows();
        duplicates = remaining - cleaner.table().len();
        remaining = cleaner.table().len();
    }

    let mut missing = 0;
    if options.drop_missing {
        cleaner.remove_missing_text()?;
        missing = remaining - cleaner.table().len();
        remaining = cleaner.table().len();
    }

    if options.normalize {
        cleaner.apply_normalize_text()?;
    }

    cleaner.limit_row_text_length(options.max_words)?;
    let over_length = remaining - cleaner.table().len();

    let cleaned = cleaner.into_table();
    let kept = cleaned.len();

    let write_output = !dry_run;
    if let Some(output) = output {
        if write_output {
            sumprep_formats::save_csv(output, &cleaned)?;
        }
    }

    if json_output {
        let report = serde_json::json!({
            "input": input.to_string_lossy().to_string(),
            "output": output.filter(|_| write_output).map(|p| p.to_string_lossy().to_string()),
            "total_rows": total,
            "sampled_out": sampled_out,
            "duplicates_removed": duplicates,
            "missing_text_removed": missing,
            "over_length_removed": over_length,
            "final_rows": kept,
            "dry_run": dry_run,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        progress::print_clean_report(
            input,
            output.filter(|_| write_output),
            total,
            sampled_out,
            duplicates,
            missing,
            over_length,
            kept,
        );
    }

    Ok(cleaned)
}

fn run_extract(input: &Path, output: &Path, text_column: &str, summary_column: &str) -> Result<()> {
    let table = sumprep_formats::load_csv(input)
        .with_context(|| format!("failed to load {}", input.display()))?;
    let records = sumprep_prep::extract_records(&table, text_column, summary_column)?;
    sumprep_formats::write_jsonl(output, &records)?;
    progress::print_stage_report("extract", input, output, records.len());
    Ok(())
}

fn run_prepare(input: &Path, output: &Path) -> Result<()> {
    let records: Vec<SourceRecord> = sumprep_formats::read_jsonl(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let prepared = sumprep_prep::prepare_records(records);
    sumprep_formats::write_jsonl(output, &prepared)?;
    progress::print_stage_report("prepare", input, output, prepared.len());
    Ok(())
}

fn run_format(
    input: &Path,
    out_dir: &Path,
    train_size: usize,
    val_size: usize,
    full_output: Option<&Path>,
) -> Result<()> {
    let records: Vec<PreparedRecord> = sumprep_formats::read_jsonl(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let examples = sumprep_prep::format_examples(&records)?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    if let Some(full_output) = full_output {
        sumprep_formats::write_jsonl(full_output, &examples)?;
    }

    let formatted = examples.len();
    let (train, val) = sumprep_prep::split_examples(examples, train_size, val_size);

    let train_path = out_dir.join("train.json");
    let val_path = out_dir.join("val.json");
    sumprep_formats::write_json_array(&train_path, &train)?;
    sumprep_formats::write_json_array(&val_path, &val)?;

    info!(
        "Formatted {} examples into {} train / {} val",
        formatted,
        train.len(),
        val.len()
    );
    progress::print_stage_report("format", input, out_dir, formatted);
    Ok(())
}

fn run_pipeline(input: &Path, out_dir: &Path, config_path: &Path, json_output: bool) -> Result<()> {
    info!("Running preparation pipeline");
    info!("  Input: {:?}", input);
    info!("  Output dir: {:?}", out_dir);
    info!("  Config: {:?}", config_path);

    let config = PipelineConfig::load(config_path)?;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let cleaned_path = out_dir.join("cleaned.csv");
    let cleaned = run_clean(input, Some(&cleaned_path), &config.clean, false, json_output)?;

    let records =
        sumprep_prep::extract_records(&cleaned, &config.clean.text_column, &config.clean.summary_column)?;
    let extracted_path = out_dir.join("extracted.jsonl");
    sumprep_formats::write_jsonl(&extracted_path, &records)?;

    let prepared = sumprep_prep::prepare_records(records);
    let prepared_path = out_dir.join("prepared.jsonl");
    sumprep_formats::write_jsonl(&prepared_path, &prepared)?;

    let examples = sumprep_prep::format_examples(&prepared)?;
    let formatted_path = out_dir.join("formatted.jsonl");
    sumprep_formats::write_jsonl(&formatted_path, &examples)?;

    let (train, val) =
        sumprep_prep::split_examples(examples, config.format.train_size, config.format.val_size);
    sumprep_formats::write_json_array(out_dir.join("train.json"), &train)?;
    sumprep_formats::write_json_array(out_dir.join("val.json"), &val)?;

    info!(
        "Pipeline complete: {} train / {} val examples in {:?}",
        train.len(),
        val.len(),
        out_dir
    );
    Ok(())
}

fn inspect_dataset(input: &Path, limit: usize) -> Result<()> {
    info!("Inspecting dataset: {:?}", input);

    let records = sumprep_formats::preview(input, limit)?;
    for (position, record) in records.iter().enumerate() {
        println!("Record #{}: {}", position, serde_json::to_string_pretty(record)?);
    }

    info!("Showed {} records", records.len());
    Ok(())
}

fn count_dataset(input: &Path, json_output: bool) -> Result<()> {
    info!("Counting records in: {:?}", input);

    let count = match sumprep_formats::detect_format(input)? {
        SourceKind::Jsonl => {
            let mut reader = JsonlReader::open(input)?;
            let bar = reader.total_bytes().map(progress::bytes_bar);

            let mut count = 0usize;
            while let Some(record) = reader.next() {
                record?;
                count += 1;
                if let Some(ref bar) = bar {
                    bar.set_position(reader.bytes_processed());
                }
            }
            if let Some(bar) = bar {
                bar.finish();
            }
            count
        }
        SourceKind::Csv => sumprep_formats::load_csv(input)?.len(),
    };

    if json_output {
        let report = serde_json::json!({
            "input": input.to_string_lossy().to_string(),
            "total_records": count,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Total records: {}", count);
    }
    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}
