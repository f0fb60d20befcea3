pub mod error;
pub mod normalizer;
pub mod scanner;
pub mod discovery;
pub mod reader;
pub mod incremental;
pub mod parallel_processing;

// Re-export the core API for convenient access
pub use error::ScanError;
pub use normalizer::{
    normalize, normalize_into,
    CanonicalForm, NormalizationRules, Normalizer
};
pub use scanner::{
    find_palindromes, try_find_palindromes, is_palindrome, resolve, resolve_with,
    Match, MatchSet, PalindromeScanner, RawSpan, ResolveKey, ScanConfig
};

// Re-export batch processing types for the CLI and benchmarks
pub use parallel_processing::{
    FileStats, ProcessingConfig, RunStats,
    process_files_parallel, format_matches_tsv
};
