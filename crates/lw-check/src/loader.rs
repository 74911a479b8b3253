//! Loading a generated site from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::document::{Document, DocumentSet};

/// Error loading a site directory.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The site directory does not exist or is not a directory.
    #[error("Site directory not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading a directory or file failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load every regular file under `root` into a [`DocumentSet`].
///
/// Documents are keyed by their root-relative path with `/` separators.
/// Hidden files and directories (names starting with `.`) are skipped.
/// Symlinked files are read; symlinked directories are not followed.
pub fn load_dir(root: &Path) -> Result<DocumentSet, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::NotFound(root.to_path_buf()));
    }

    let mut documents = DocumentSet::new();
    load_directory(root, "", &mut documents)?;
    tracing::debug!(root = %root.display(), documents = documents.len(), "Loaded site");
    Ok(documents)
}

fn load_directory(
    dir_path: &Path,
    url_prefix: &str,
    documents: &mut DocumentSet,
) -> Result<(), LoadError> {
    let entries = fs::read_dir(dir_path).map_err(|e| io_error(dir_path, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| io_error(dir_path, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        // Skip hidden files/dirs
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let url_path = if url_prefix.is_empty() {
            name
        } else {
            format!("{url_prefix}/{name}")
        };
        let file_type = entry.file_type().map_err(|e| io_error(&path, e))?;

        if file_type.is_dir() {
            load_directory(&path, &url_path, documents)?;
        } else if path.is_file() {
            let content = fs::read(&path).map_err(|e| io_error(&path, e))?;
            documents.insert(Document::new(url_path, content));
        }
    }

    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_load_nested_files() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("guide/advanced")).unwrap();
        fs::write(root.join("index.html"), "<h1>Home</h1>").unwrap();
        fs::write(root.join("guide/setup.html"), "<h1>Setup</h1>").unwrap();
        fs::write(root.join("guide/advanced/tips.html"), "").unwrap();
        fs::write(root.join("guide/logo.png"), [0x89, b'P', b'N', b'G']).unwrap();

        let documents = load_dir(root).unwrap();

        let paths: Vec<&str> = documents.iter().map(|doc| doc.path.as_str()).collect();
        assert_eq!(
            paths,
            ["guide/advanced/tips.html", "guide/logo.png", "guide/setup.html", "index.html"]
        );
        assert_eq!(
            documents.get("guide/logo.png").map(|doc| doc.content.clone()),
            Some(vec![0x89, b'P', b'N', b'G'])
        );
    }

    #[test]
    fn test_load_skips_hidden_entries() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join(".git/HEAD"), "ref").unwrap();
        fs::write(root.join(".hidden.html"), "").unwrap();
        fs::write(root.join("page.html"), "").unwrap();

        let documents = load_dir(root).unwrap();

        assert_eq!(documents.len(), 1);
        assert!(documents.contains("page.html"));
    }

    #[test]
    fn test_load_empty_dir() {
        let temp_dir = create_test_dir();
        assert!(load_dir(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_dir() {
        let temp_dir = create_test_dir();
        let missing = temp_dir.path().join("public");

        let error = load_dir(&missing).unwrap_err();

        assert!(matches!(error, LoadError::NotFound(ref path) if path == &missing));
    }

    #[test]
    fn test_load_file_as_root() {
        let temp_dir = create_test_dir();
        let file = temp_dir.path().join("index.html");
        fs::write(&file, "").unwrap();

        assert!(matches!(load_dir(&file), Err(LoadError::NotFound(_))));
    }
}
