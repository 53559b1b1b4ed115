// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use doc_match::{
    AmbiguityPolicy, Config, DocumentConverter, FileScanner, JsonReportExporter, OcrmypdfConverter,
    Resolution, SearchOrchestrator, SearchReport, SearchRequest, TesseractEngine,
};
use doc_match::utils::logging::{format_error, format_info, format_success, format_warning};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "doc_match")]
#[command(version = "0.1.0")]
#[command(about = "OCR-driven search over scanned document trees with PDF conversion", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the input tree for a name and convert the best match
    Search {
        /// Name to search for in the extracted text
        query: String,

        /// Optional year token to filter candidates by
        #[arg(long, value_name = "YY")]
        year: Option<String>,

        #[arg(long, value_name = "DIR")]
        input: Option<PathBuf>,

        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// What to do when several candidates remain
        #[arg(long, value_enum)]
        on_ambiguous: Option<AmbiguityPolicy>,

        /// Run the search passes without converting anything
        #[arg(long)]
        dry_run: bool,

        /// Write the search report as JSON to this file
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },

    /// List the files a search would consider, without running OCR
    Scan {
        #[arg(long, value_name = "DIR")]
        input: Option<PathBuf>,
    },

    /// Convert a file, or every eligible file in a folder, to searchable PDF
    Convert {
        /// Source file or folder
        path: PathBuf,

        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    doc_match::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Search {
            query,
            year,
            input,
            output,
            on_ambiguous,
            dry_run,
            report,
            pretty,
        } => {
            let mut config = config;
            if let Some(input) = input {
                config.paths.input_root = input;
            }
            if let Some(output) = output {
                config.paths.output_root = output;
            }

            let request = SearchRequest {
                query,
                year,
                policy: on_ambiguous.unwrap_or(config.search.on_ambiguous),
                dry_run,
            };

            cmd_search(config, request, report, pretty).await?;
        }
        Commands::Scan { input } => {
            let mut config = config;
            if let Some(input) = input {
                config.paths.input_root = input;
            }
            cmd_scan(&config)?;
        }
        Commands::Convert { path, output } => {
            let mut config = config;
            if let Some(output) = output {
                config.paths.output_root = output;
            }
            cmd_convert(&config, path).await?;
        }
    }

    Ok(())
}

async fn cmd_search(
    config: Config,
    request: SearchRequest,
    report_path: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let engine = TesseractEngine::new(config.ocr.clone());
    let converter = OcrmypdfConverter::new(config.ocr.clone());

    let orchestrator = SearchOrchestrator::new(config, engine, converter);
    let (report, _stats) = orchestrator
        .run(&request)
        .await
        .context("Search pipeline failed")?;

    print_report(&report);

    if let Some(path) = report_path {
        JsonReportExporter::export(&report, &path, pretty)
            .context("Failed to export search report")?;
    }

    Ok(())
}

fn print_report(report: &SearchReport) {
    if report.candidates.is_empty() {
        println!("\nNo matching documents found for: \"{}\"\n", report.query);
        println!("Try:");
        println!("  - Fewer or different name parts");
        println!("  - Dropping the year filter");
        println!("  - Checking the input folder path");
        return;
    }

    println!("\nSearch Results for: \"{}\"\n", report.query);
    println!("Found {} candidate(s)\n", report.candidates.len());

    for (idx, candidate) in report.candidates.iter().enumerate() {
        println!("{}. {}", idx + 1, candidate);
    }
    println!();

    let summary = report.format_summary();
    match &report.resolution {
        Resolution::Converted { .. } => println!("{}", format_success(&summary)),
        Resolution::ConversionFailed { .. } => println!("{}", format_error(&summary)),
        Resolution::Ambiguous { .. } | Resolution::NoMatch => {
            println!("{}", format_warning(&summary))
        }
        Resolution::Skipped => println!("{}", format_info(&summary)),
    }
}

fn cmd_scan(config: &Config) -> Result<()> {
    let scanner = FileScanner::new(config.search.clone());
    let files = scanner
        .scan_directory(&config.paths.input_root)
        .context("Failed to scan input folder")?;

    if files.is_empty() {
        println!(
            "No eligible files under {}",
            config.paths.input_root.display()
        );
        return Ok(());
    }

    for file in &files {
        println!("{:>8} KiB  {}", file.size / 1024, file.relative_path);
    }
    println!("\n{} file(s) would be searched", files.len());

    Ok(())
}

async fn cmd_convert(config: &Config, path: PathBuf) -> Result<()> {
    let converter = OcrmypdfConverter::new(config.ocr.clone());
    let output_root = &config.paths.output_root;
    std::fs::create_dir_all(output_root).context("Cannot create output folder")?;

    if path.is_dir() {
        let scanner = FileScanner::new(config.search.clone());
        let files = scanner
            .scan_directory(&path)
            .context("Failed to scan folder for conversion")?;

        if files.is_empty() {
            println!("No eligible files under {}", path.display());
            return Ok(());
        }

        let mut converted = 0usize;
        for file in &files {
            match converter.convert(&file.path, output_root).await {
                Ok(output) => {
                    converted += 1;
                    println!("{}", format_success(&format!("{}", output.display())));
                }
                Err(e) => {
                    error!("Failed to convert {}: {}", file.relative_path, e);
                    println!("{}", format_error(&format!("{}: {}", file.relative_path, e)));
                }
            }
        }
        println!("\nConverted {}/{} file(s)", converted, files.len());
    } else {
        if !path.exists() {
            anyhow::bail!("Source does not exist: {}", path.display());
        }
        let output = converter
            .convert(&path, output_root)
            .await
            .context("Conversion failed")?;
        println!("{}", format_success(&format!("{}", output.display())));
    }

    Ok(())
}
