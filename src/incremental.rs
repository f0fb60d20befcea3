// WHY: batch runs skip inputs whose results are already on disk
// An aux file counts as complete only when it is newline-terminated

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Suffix appended to an input's file stem to name its result file
pub const AUX_FILE_SUFFIX: &str = "_palindromes.txt";

/// Generate auxiliary file path from source file path
pub fn generate_aux_file_path(source_path: &Path) -> PathBuf {
    let mut aux_path = source_path.to_path_buf();
    let file_stem = aux_path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    aux_path.set_file_name(format!("{file_stem}{AUX_FILE_SUFFIX}"));
    aux_path
}

/// Check if auxiliary file exists for given source file
pub fn aux_file_exists<P: AsRef<Path>>(source_path: P) -> bool {
    generate_aux_file_path(source_path.as_ref()).exists()
}

/// True when the aux file exists and was fully written.
/// A file with no matches is a single newline, so emptiness means interrupted.
pub fn aux_file_is_complete<P: AsRef<Path>>(source_path: P) -> bool {
    let aux_path = generate_aux_file_path(source_path.as_ref());
    match fs::read(&aux_path) {
        Ok(content) => content.last() == Some(&b'\n'),
        Err(_) => false,
    }
}

/// Read auxiliary file content for given source file
pub fn read_aux_file<P: AsRef<Path>>(source_path: P) -> Result<String, io::Error> {
    fs::read_to_string(generate_aux_file_path(source_path.as_ref()))
}

/// Write a complete auxiliary file (with trailing newline) for given source
pub fn create_complete_aux_file<P: AsRef<Path>>(source_path: P, content: &str) -> Result<PathBuf, io::Error> {
    let aux_path = generate_aux_file_path(source_path.as_ref());
    let content_with_newline = if content.ends_with('\n') {
        content.to_string()
    } else {
        format!("{content}\n")
    };
    fs::write(&aux_path, content_with_newline)?;
    Ok(aux_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_aux_path_naming() {
        let aux = generate_aux_file_path(Path::new("/corpus/tehillim.txt"));
        assert_eq!(aux, PathBuf::from("/corpus/tehillim_palindromes.txt"));
    }

    #[test]
    fn test_completeness_requires_trailing_newline() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("verse.txt");

        assert!(!aux_file_is_complete(&source));

        fs::write(generate_aux_file_path(&source), "3\tאבא\tאבא\t(0,3)").unwrap();
        assert!(aux_file_exists(&source));
        assert!(!aux_file_is_complete(&source));

        create_complete_aux_file(&source, "3\tאבא\tאבא\t(0,3)").unwrap();
        assert!(aux_file_is_complete(&source));
        assert_eq!(read_aux_file(&source).unwrap(), "3\tאבא\tאבא\t(0,3)\n");
    }

    #[test]
    fn test_empty_result_is_still_complete() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("prose.txt");

        create_complete_aux_file(&source, "").unwrap();
        assert!(aux_file_is_complete(&source));
    }
}
