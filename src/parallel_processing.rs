// WHY: batch scanning of many texts, one scanner call per file
// A single text is never split across workers; parallelism is across files only

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{info, warn};

use crate::incremental::{aux_file_is_complete, generate_aux_file_path};
use crate::reader::{ReaderConfig, TextFileReader};
use crate::scanner::{Match, PalindromeScanner, ScanConfig};

/// Configuration for a batch run
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    pub scan: ScanConfig,
    /// Rescan files whose aux file is already complete
    pub overwrite_all: bool,
    /// Abort the run on the first file error
    pub fail_fast: bool,
    pub use_mmap: bool,
    /// Files scanned concurrently
    pub concurrency: usize,
    pub show_progress: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            overwrite_all: false,
            fail_fast: false,
            use_mmap: false,
            concurrency: num_cpus::get().max(1),
            show_progress: false,
        }
    }
}

/// Per-file processing statistics
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileStats {
    pub path: String,
    /// Code points in the input text
    pub chars_processed: u64,
    pub palindromes_found: u64,
    /// Length of the longest palindrome, 0 when none were found
    pub longest_palindrome: u64,
    pub processing_time_ms: u64,
    /// Scanner time only (subset of processing_time_ms)
    pub scan_time_ms: u64,
    /// success, skipped or failed
    pub status: String,
    pub error: Option<String>,
}

impl FileStats {
    fn skipped(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            chars_processed: 0,
            palindromes_found: 0,
            longest_palindrome: 0,
            processing_time_ms: 0,
            scan_time_ms: 0,
            status: "skipped".to_string(),
            error: None,
        }
    }

    fn failed(path: &Path, error: &anyhow::Error) -> Self {
        Self {
            status: "failed".to_string(),
            error: Some(format!("{error:#}")),
            ..Self::skipped(path)
        }
    }
}

/// Summary of a batch run, written as JSON
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RunStats {
    pub files_processed: u64,
    pub files_skipped: u64,
    pub files_failed: u64,
    pub total_chars: u64,
    pub total_palindromes: u64,
    pub run_time_ms: u64,
    pub files: Vec<FileStats>,
}

impl RunStats {
    fn record(&mut self, stats: FileStats) {
        match stats.status.as_str() {
            "success" => {
                self.files_processed += 1;
                self.total_chars += stats.chars_processed;
                self.total_palindromes += stats.palindromes_found;
            }
            "skipped" => self.files_skipped += 1,
            _ => self.files_failed += 1,
        }
        self.files.push(stats);
    }
}

/// Keep each match on one TSV line
fn single_line(original: &str) -> String {
    original
        .chars()
        .map(|c| if c == '\t' || c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

/// Format matches one per line: `length<TAB>canonical<TAB>original<TAB>(start,end)`
pub fn format_matches_tsv(matches: &[Match]) -> String {
    let mut output = String::new();
    for m in matches {
        output.push_str(&format!(
            "{}\t{}\t{}\t({},{})\n",
            m.length,
            m.canonical,
            single_line(&m.original),
            m.span.start,
            m.span.end
        ));
    }
    output
}

/// Write the aux file for one input; an empty result is a lone newline
async fn write_aux_file(aux_path: &Path, matches: &[Match]) -> Result<()> {
    let file = tokio::fs::File::create(aux_path)
        .await
        .with_context(|| format!("Failed to create {}", aux_path.display()))?;
    let mut writer = BufWriter::new(file);

    if matches.is_empty() {
        writer.write_all(b"\n").await?;
    } else {
        writer.write_all(format_matches_tsv(matches).as_bytes()).await?;
    }

    writer.flush().await?;
    Ok(())
}

/// Read, scan and write results for one file
async fn process_file(
    path: &Path,
    scanner: Arc<PalindromeScanner>,
    config: &ProcessingConfig,
) -> Result<FileStats> {
    if !config.overwrite_all && aux_file_is_complete(path) {
        info!("Skipping {} (aux file complete)", path.display());
        return Ok(FileStats::skipped(path));
    }

    let start_time = Instant::now();
    let reader = TextFileReader::new(ReaderConfig {
        fail_fast: true,
        use_mmap: config.use_mmap,
    });
    let (text, read_stats) = reader.read_text(path).await?;

    let scan_start = Instant::now();
    let matches = tokio::task::spawn_blocking(move || scanner.scan(&text)).await?;
    let scan_time_ms = scan_start.elapsed().as_millis() as u64;

    write_aux_file(&generate_aux_file_path(path), &matches).await?;

    let stats = FileStats {
        path: path.display().to_string(),
        chars_processed: read_stats.chars_read,
        palindromes_found: matches.len() as u64,
        longest_palindrome: matches.first().map_or(0, |m| m.length as u64),
        processing_time_ms: start_time.elapsed().as_millis() as u64,
        scan_time_ms,
        status: "success".to_string(),
        error: None,
    };

    info!(
        "Scanned {}: {} chars, {} palindromes in {}ms",
        stats.path, stats.chars_processed, stats.palindromes_found, stats.processing_time_ms
    );
    Ok(stats)
}

/// Scan files concurrently, writing an aux file next to each input
pub async fn process_files_parallel(paths: Vec<PathBuf>, config: ProcessingConfig) -> Result<RunStats> {
    let run_start = Instant::now();
    let scanner = Arc::new(PalindromeScanner::new(config.scan.clone())?);

    let progress = if config.show_progress {
        let bar = ProgressBar::new(paths.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?,
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    info!("Processing {} files with concurrency {}", paths.len(), config.concurrency);

    let config_ref = &config;
    let mut results = stream::iter(paths)
        .map(|path| {
            let scanner = Arc::clone(&scanner);
            async move {
                let result = process_file(&path, scanner, config_ref).await;
                (path, result)
            }
        })
        .buffer_unordered(config.concurrency.max(1));

    let mut run_stats = RunStats::default();

    while let Some((path, result)) = results.next().await {
        progress.inc(1);
        match result {
            Ok(stats) => run_stats.record(stats),
            Err(e) if config.fail_fast => {
                progress.abandon_with_message("failed");
                return Err(e.context(format!("Processing failed for {}", path.display())));
            }
            Err(e) => {
                warn!("Failed to process {}: {:#}", path.display(), e);
                run_stats.record(FileStats::failed(&path, &e));
            }
        }
    }

    progress.finish_with_message("done");

    run_stats.files.sort_by(|a, b| a.path.cmp(&b.path));
    run_stats.run_time_ms = run_start.elapsed().as_millis() as u64;

    info!(
        "Run complete: {} processed, {} skipped, {} failed, {} palindromes",
        run_stats.files_processed, run_stats.files_skipped, run_stats.files_failed, run_stats.total_palindromes
    );
    Ok(run_stats)
}

/// Persist run statistics as pretty JSON
pub async fn write_run_stats(stats: &RunStats, stats_path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(stats)?;
    tokio::fs::write(stats_path, content)
        .await
        .with_context(|| format!("Failed to write stats to {}", stats_path.display()))?;
    Ok(())
}
