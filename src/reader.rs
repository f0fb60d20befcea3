use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, warn};

/// Configuration for file reading behavior
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Read through a memory map instead of async buffered I/O
    pub use_mmap: bool,
}

/// Statistics for file reading operations
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub bytes_read: u64,
    pub chars_read: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

impl ReadStats {
    fn failed(path: &Path, duration_ms: u64, error: String) -> Self {
        Self {
            file_path: path.display().to_string(),
            bytes_read: 0,
            chars_read: 0,
            duration_ms,
            read_error: Some(error),
        }
    }
}

/// Reads whole text files; verse collections are small enough to hold in memory
pub struct TextFileReader {
    config: ReaderConfig,
}

impl TextFileReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a file into a string, validating UTF-8.
    /// Without fail_fast, errors are reported in the stats and the text is empty.
    pub async fn read_text<P: AsRef<Path>>(&self, file_path: P) -> Result<(String, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting read of file: {}", path.display());

        let read_result = if self.config.use_mmap {
            read_mmap(path)
        } else {
            read_buffered(path).await
        };

        let duration_ms = start_time.elapsed().as_millis() as u64;

        match read_result {
            Ok(text) => {
                let stats = ReadStats {
                    file_path: path.display().to_string(),
                    bytes_read: text.len() as u64,
                    chars_read: text.chars().count() as u64,
                    duration_ms,
                    read_error: None,
                };
                info!(
                    "Read {}: {} bytes, {} chars in {}ms",
                    path.display(),
                    stats.bytes_read,
                    stats.chars_read,
                    duration_ms
                );
                Ok((text, stats))
            }
            Err(e) => {
                let error_msg = format!("{e:#}");
                warn!("{}", error_msg);

                if self.config.fail_fast {
                    Err(e)
                } else {
                    Ok((String::new(), ReadStats::failed(path, duration_ms, error_msg)))
                }
            }
        }
    }
}

async fn read_buffered(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("Failed to open file {}", path.display()))?;
    String::from_utf8(bytes)
        .with_context(|| format!("UTF-8 decoding error in {}", path.display()))
}

fn read_mmap(path: &Path) -> Result<String> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open file {}", path.display()))?;
    // SAFETY: input files must not be truncated or rewritten while a run is in progress
    let mmap = unsafe { memmap2::Mmap::map(&file) }
        .with_context(|| format!("Failed to memory-map {}", path.display()))?;
    let text = std::str::from_utf8(&mmap)
        .with_context(|| format!("UTF-8 decoding error in {}", path.display()))?;
    Ok(text.to_owned())
}

/// Convenience function for reading a single file with default configuration
pub async fn read_file_async<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let reader = TextFileReader::new(ReaderConfig { fail_fast: true, ..Default::default() });
    let (text, _stats) = reader.read_text(file_path).await?;
    Ok(text)
}
