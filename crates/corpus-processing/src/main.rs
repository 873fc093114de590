//! CLI entry point for the corpus pipeline.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use corpus_processing::io::DEFAULT_OUTPUT_NAME;
use corpus_processing::utils::truncate_str;
use corpus_processing::{
    CorpusReport, CsvExporter, EmptyFragmentPolicy, JsonLoader, Pipeline, PipelineConfig,
    PipelineResult, TokenStatsMode, write_report,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Characters shown per post in the preview.
const PREVIEW_CHARS: usize = 100;

/// CLI-compatible token statistics mode
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliTokenStats {
    /// Average over every post
    Aggregate,
    /// First post only (matches older tooling)
    FirstPost,
}

impl From<CliTokenStats> for TokenStatsMode {
    fn from(cli: CliTokenStats) -> Self {
        match cli {
            CliTokenStats::Aggregate => TokenStatsMode::Aggregate,
            CliTokenStats::FirstPost => TokenStatsMode::FirstPostOnly,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author = "Corpus Processing Team",
    version,
    about = "Chat export to clean text corpus",
    long_about = "Extracts posts from a chat export (.json), cleans their text and \
                  reports corpus statistics.\n\n\
                  EXAMPLES:\n  \
                  # Clean an export and write outputs/cleaned_posts.csv\n  \
                  corpus-processing -i result.json\n\n  \
                  # Preview without writing files\n  \
                  corpus-processing -i result.json --dry-run --preview 10\n\n  \
                  # Machine-readable summary\n  \
                  corpus-processing -i result.json --json | jq .stats"
)]
struct Args {
    /// Path to the JSON export to process
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for results
    #[arg(short, long, default_value = "./outputs")]
    output: PathBuf,

    /// Output CSV file name (without extension)
    #[arg(long, default_value = DEFAULT_OUTPUT_NAME)]
    output_name: String,

    /// Document key holding the message list
    #[arg(long, default_value = "messages")]
    messages_key: String,

    /// Key holding text on messages and fragments
    #[arg(long, default_value = "text")]
    text_key: String,

    /// Skip messages whose fragment list resolves to empty text
    #[arg(long)]
    drop_empty_fragments: bool,

    /// How the average token length is computed
    #[arg(long, value_enum, default_value = "aggregate")]
    token_stats: CliTokenStats,

    /// Normalize posts in parallel
    #[arg(long)]
    parallel: bool,

    /// Number of cleaned posts to print after processing
    #[arg(long, default_value = "3")]
    preview: usize,

    /// Process and print results without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON summary to stdout instead of human-readable output
    ///
    /// Disables all logs; only the JSON summary is printed.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory as <input_name>_report.json
    #[arg(short = 'r', long, conflicts_with = "dry_run")]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let document = JsonLoader::new(&args.input).load()?;

    let config = PipelineConfig::builder()
        .messages_key(&args.messages_key)
        .text_key(&args.text_key)
        .empty_fragment_policy(if args.drop_empty_fragments {
            EmptyFragmentPolicy::Drop
        } else {
            EmptyFragmentPolicy::Keep
        })
        .token_stats_mode(args.token_stats.into())
        .parallel_normalization(args.parallel)
        .build()?;

    let mut builder = Pipeline::builder().config(config.clone());
    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            debug!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }
    let result = builder.build()?.process(&document);

    let csv_path = if args.dry_run {
        info!("Dry run: no files written");
        None
    } else {
        Some(
            CsvExporter::new(&args.output)
                .with_file_name(&args.output_name)
                .export(&result.posts)?,
        )
    };

    if args.emit_report {
        let report = CorpusReport {
            input: args.input.display().to_string(),
            output: csv_path.as_ref().map(|p| p.display().to_string()),
            token_stats_mode: config.token_stats_mode,
            config,
            summary: result.summary(),
        };
        write_report(&args.output, &file_stem(&args.input), &report)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.summary())?);
    } else {
        print_results(&result, args.preview);
    }

    Ok(())
}

/// Print the first cleaned posts and the corpus statistics.
///
/// Uses `println!` on purpose: this is the command's output, not logging.
fn print_results(result: &PipelineResult, preview: usize) {
    if preview > 0 && !result.posts.is_empty() {
        println!("\nFirst {} cleaned posts:", preview.min(result.posts.len()));
        for (i, post) in result.posts.iter().take(preview).enumerate() {
            println!("{}) {}", i + 1, truncate_str(&post.text, PREVIEW_CHARS));
        }
    }

    println!();
    println!(
        "Messages: {} seen, {} skipped",
        result.messages_seen, result.messages_skipped
    );
    match &result.stats {
        Some(stats) => {
            println!("Posts: {}", stats.post_count);
            println!("Average length (chars): {:.2}", stats.avg_char_length);
            println!("Average token length: {:.2}", stats.avg_token_length);
        }
        None => println!("No statistics: the corpus is empty"),
    }
}

/// Extract the file stem (name without extension) from a path.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("corpus")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_emit_report_conflicts_with_dry_run() {
        let err = Args::try_parse_from(["corpus-processing", "-i", "a.json", "--dry-run", "-r"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_emit_report_alone_is_accepted() {
        let args = Args::try_parse_from(["corpus-processing", "-i", "a.json", "-r"]).unwrap();
        assert!(args.emit_report);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("exports/result.json")), "result");
    }
}
