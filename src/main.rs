use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hebpal::discovery::{self, DiscoveryConfig, DEFAULT_PATTERN};
use hebpal::parallel_processing::{self, ProcessingConfig};
use hebpal::reader::{ReaderConfig, TextFileReader};
use hebpal::scanner::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, DEFAULT_RAW_SPAN_FACTOR};
use hebpal::{format_matches_tsv, MatchSet, NormalizationRules, PalindromeScanner, ResolveKey, ScanConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "hebpal")]
#[command(about = "Find palindromic letter sequences in Hebrew text")]
#[command(version)]
struct Args {
    /// File or directory to scan, or "-" for stdin
    #[arg(required_unless_present = "text")]
    input: Option<PathBuf>,

    /// Scan this text instead of reading INPUT
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Shortest palindrome to report, in letters
    #[arg(long, default_value_t = DEFAULT_MIN_LENGTH)]
    min_length: usize,

    /// Longest palindrome to report, in letters
    #[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
    max_length: usize,

    /// Raw spans longer than this multiple of max-length are not extended
    #[arg(long, default_value_t = DEFAULT_RAW_SPAN_FACTOR)]
    raw_span_factor: usize,

    /// Keep chapter:verse citations in the text instead of stripping them
    #[arg(long)]
    no_strip_references: bool,

    /// Report every distinct original text, not one per palindrome
    #[arg(long)]
    keep_all_occurrences: bool,

    /// Output format for single inputs
    #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
    format: OutputFormat,

    /// File-name pattern for directory inputs
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Rescan files whose results are already complete
    #[arg(long)]
    overwrite_all: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Use memory-mapped I/O instead of async buffered reads
    #[arg(long)]
    use_mmap: bool,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Stats output file path for directory inputs
    #[arg(long, default_value = "run_stats.json")]
    stats_out: PathBuf,
}

impl Args {
    fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            min_length: self.min_length,
            max_length: self.max_length,
            raw_span_factor: self.raw_span_factor,
            rules: if self.no_strip_references {
                NormalizationRules::plain()
            } else {
                NormalizationRules::default()
            },
            resolve_key: if self.keep_all_occurrences {
                ResolveKey::CanonicalAndOriginal
            } else {
                ResolveKey::Canonical
            },
        }
    }
}

fn print_matches(matches: &MatchSet, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Tsv => print!("{}", format_matches_tsv(matches)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(matches)?),
    }
    Ok(())
}

async fn read_single_input(path: &Path, use_mmap: bool) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }

    let reader = TextFileReader::new(ReaderConfig { fail_fast: true, use_mmap });
    let (text, _stats) = reader.read_text(path).await?;
    Ok(text)
}

async fn run_directory(root_dir: &Path, args: &Args, scan: ScanConfig) -> Result<()> {
    let discovery_config = DiscoveryConfig {
        fail_fast: args.fail_fast,
        pattern: args.pattern.clone(),
    };

    info!("Starting file discovery in: {}", root_dir.display());
    let discovered = discovery::collect_discovered_files(root_dir, discovery_config).await?;

    let (valid, invalid): (Vec<_>, Vec<_>) = discovered.into_iter().partition(|f| f.error.is_none());
    for file in &invalid {
        if let Some(ref error) = file.error {
            info!("Issue with {}: {}", file.path.display(), error);
        }
    }

    eprintln!("Found {} files matching {}", valid.len() + invalid.len(), args.pattern);

    let processing_config = ProcessingConfig {
        scan,
        overwrite_all: args.overwrite_all,
        fail_fast: args.fail_fast,
        use_mmap: args.use_mmap,
        show_progress: !args.no_progress,
        ..ProcessingConfig::default()
    };

    let paths = valid.into_iter().map(|f| f.path).collect();
    let run_stats = parallel_processing::process_files_parallel(paths, processing_config).await?;
    parallel_processing::write_run_stats(&run_stats, &args.stats_out).await?;

    eprintln!("Scan complete:");
    eprintln!("  Processed: {} files", run_stats.files_processed);
    eprintln!("  Skipped (already complete): {} files", run_stats.files_skipped);
    if run_stats.files_failed > 0 {
        eprintln!("  Failed: {} files", run_stats.files_failed);
    }
    eprintln!("  Palindromes found: {}", run_stats.total_palindromes);
    eprintln!("  Stats written to {}", args.stats_out.display());

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries results, so logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let scan = args.scan_config();
    // surfaces a bad range as a CLI error before any file is touched
    scan.validate()?;

    if let Some(ref text) = args.text {
        let scanner = PalindromeScanner::new(scan)?;
        return print_matches(&scanner.scan(text), args.format);
    }

    let Some(ref input) = args.input else {
        anyhow::bail!("No input given");
    };

    if input.is_dir() {
        return run_directory(input, &args, scan).await;
    }

    if input != Path::new("-") && !input.exists() {
        anyhow::bail!("Input does not exist: {}", input.display());
    }

    let text = read_single_input(input, args.use_mmap).await?;
    let scanner = PalindromeScanner::new(scan)?;
    let matches = tokio::task::spawn_blocking(move || scanner.scan(&text)).await?;
    info!("Found {} palindromes in {}", matches.len(), input.display());

    print_matches(&matches, args.format)
}
