//! sedump - data-exchange dump to CSV converter

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sedump_common::logging::{init_logging, LogConfig, LogLevel};
use sedump_common::types::Entity;
use sedump_convert::audit;
use sedump_convert::config::ConvertConfig;
use sedump_convert::loader::CommandLoader;
use sedump_convert::pipeline;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "sedump")]
#[command(author, version, about = "Convert data-exchange XML dumps into CSV chunks")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one dump file and load each chunk as it is sealed
    Convert {
        /// Dump file: Tags.xml, Users.xml, Badges.xml, Votes.xml or Comments.xml
        input: PathBuf,

        /// Directory for chunk files
        #[arg(short, long, env = "SEDUMP_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Report the longest value of a CSV column
    Audit {
        /// CSV file with a header row
        file: PathBuf,

        /// Column to measure
        #[arg(short, long, default_value = "tag_name")]
        column: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over CLI defaults
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("sedump")
        .build()
        .merge_env()?;

    let _log_guard = init_logging(&log_config)?;

    match cli.command {
        Command::Convert { input, output_dir } => convert(input, output_dir).await?,
        Command::Audit { file, column } => {
            let width = audit::column_width_of_file(&file, &column)
                .with_context(|| format!("Failed to audit {}", file.display()))?;
            info!(
                column = %width.column,
                rows = width.rows,
                max_chars = width.max_chars,
                longest = %width.longest,
                "Longest value"
            );
        },
    }

    Ok(())
}

async fn convert(input: PathBuf, output_dir: Option<PathBuf>) -> Result<()> {
    let mut config = ConvertConfig::from_env();
    if let Some(dir) = output_dir {
        config = config.with_output_dir(dir);
    }
    config.validate()?;

    let entity = Entity::from_path(&input)?;
    let loader = CommandLoader::for_entity(entity, &config);

    let summary = pipeline::run(&input, &config, loader)
        .await
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    for path in &summary.report.failed {
        warn!(path = %path.display(), "Chunk was not loaded and is left on disk");
    }
    for path in &summary.report.undeleted {
        warn!(path = %path.display(), "Chunk was loaded but could not be deleted");
    }

    info!(
        entity = %summary.entity,
        rows = summary.rows,
        skipped = summary.skipped,
        chunks = summary.chunks,
        loaded = summary.report.loaded.len(),
        "Done"
    );
    Ok(())
}
