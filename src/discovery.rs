use anyhow::{Context, Result};
use futures::stream::{self, Stream, StreamExt};
use glob::Pattern;
use ignore::{WalkBuilder, WalkState};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::incremental::AUX_FILE_SUFFIX;

/// Default file-name pattern for input texts
pub const DEFAULT_PATTERN: &str = "*.txt";

/// Configuration for file discovery behavior
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Glob matched against file names (not full paths)
    pub pattern: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

/// Result of file discovery validation
#[derive(Debug, Clone)]
pub struct FileValidation {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// True for input files: name matches the pattern and is not one of our own aux outputs
fn is_candidate(file_name: &str, pattern: &Pattern) -> bool {
    pattern.matches(file_name) && !file_name.ends_with(AUX_FILE_SUFFIX)
}

/// Discover matching files recursively under `root_dir` with a parallel walker.
/// Files are streamed as they are found.
pub fn discover_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> Result<impl Stream<Item = Result<FileValidation>>> {
    let root_path = root_dir.as_ref().to_path_buf();
    let pattern = Pattern::new(&config.pattern)
        .with_context(|| format!("Invalid file pattern: {}", config.pattern))?;
    let pattern = Arc::new(pattern);
    let config = Arc::new(config);

    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        info!("Starting directory traversal in: {}", root_path.display());
        let traversal_start = std::time::Instant::now();

        let walker = WalkBuilder::new(&root_path)
            .threads((num_cpus::get() / 2).max(1))
            .follow_links(false)
            .hidden(false)
            .ignore(false)
            .git_ignore(false)
            .build_parallel();

        let (path_tx, mut path_rx) = mpsc::unbounded_channel::<PathBuf>();

        // the walker blocks, so it runs on the blocking pool and hands paths back
        // over a channel the async side can await
        let walk_pattern = Arc::clone(&pattern);
        tokio::task::spawn_blocking(move || {
            walker.run(|| {
                let path_tx = path_tx.clone();
                let pattern = Arc::clone(&walk_pattern);
                Box::new(move |result| {
                    let Ok(entry) = result else {
                        return WalkState::Continue;
                    };
                    let is_match = entry.file_type().is_some_and(|ft| ft.is_file())
                        && entry.file_name().to_str().is_some_and(|name| is_candidate(name, &pattern));
                    if !is_match {
                        return WalkState::Continue;
                    }
                    debug!("Found matching file: {}", entry.path().display());
                    if path_tx.send(entry.path().to_path_buf()).is_err() {
                        return WalkState::Quit;
                    }
                    WalkState::Continue
                })
            });
        });

        let mut file_count = 0;
        while let Some(path) = path_rx.recv().await {
            file_count += 1;

            match validate_file(&path, &config).await {
                Ok(validation) => {
                    if tx.send(Ok(validation)).is_err() {
                        debug!("Receiver dropped, stopping discovery");
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.send(Err(e));
                    break;
                }
            }
        }

        info!(
            "Discovery completed in {}ms, streamed {} files",
            traversal_start.elapsed().as_millis(),
            file_count
        );
    });

    Ok(stream::unfold(rx, |mut receiver| async move {
        receiver.recv().await.map(|result| (result, receiver))
    }))
}

/// Check that a discovered path is an accessible regular file.
/// Returns Err only under fail_fast; otherwise problems are recorded on the validation.
async fn validate_file(path: &Path, config: &DiscoveryConfig) -> Result<FileValidation> {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => Ok(FileValidation {
            path: path.to_path_buf(),
            error: None,
        }),
        Ok(_) => {
            let error = format!("Path is not a file: {}", path.display());
            warn!("{}", error);
            Ok(FileValidation {
                path: path.to_path_buf(),
                error: Some(error),
            })
        }
        Err(e) => {
            let error = format!("Cannot access file {}: {}", path.display(), e);
            warn!("{}", error);

            if config.fail_fast {
                Err(anyhow::anyhow!(error))
            } else {
                Ok(FileValidation {
                    path: path.to_path_buf(),
                    error: Some(error),
                })
            }
        }
    }
}

/// Collect all discovered files, sorted by path for stable output
pub async fn collect_discovered_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> Result<Vec<FileValidation>> {
    let mut files = Vec::new();
    let mut stream = Box::pin(discover_files(root_dir, config)?);

    while let Some(result) = stream.next().await {
        files.push(result?);
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));

    let valid_count = files.iter().filter(|f| f.error.is_none()).count();
    let invalid_count = files.len() - valid_count;

    if invalid_count > 0 {
        warn!("Found {} files with validation issues", invalid_count);
    }

    info!("File discovery summary: {} valid, {} invalid", valid_count, invalid_count);

    Ok(files)
}

/// Convenience function returning only the paths of valid files
pub async fn find_text_files<P: AsRef<Path>>(root_dir: P) -> Result<Vec<PathBuf>> {
    let validations = collect_discovered_files(root_dir, DiscoveryConfig::default()).await?;

    Ok(validations
        .into_iter()
        .filter(|v| v.error.is_none())
        .map(|v| v.path)
        .collect())
}
