// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::constant::{ANNOTATION_EXTENSION, SUPPORTED_IMAGE_FORMATS};
use crate::error::SorrelError;

/// Ensure a directory exists, creating parents as needed
///
/// Idempotent: calling it on an existing directory is a no-op and
/// pre-existing contents are never touched.
///
/// # Arguments
///
/// * `directory` - Path to the directory to ensure
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use sorrel_core::ut::path::ensure_directory;
///
/// let base = Path::new("TEST_ENSURE_DIRECTORY/a/b");
///
/// ensure_directory(base).unwrap();
/// ensure_directory(base).unwrap();
/// assert!(base.exists());
///
/// std::fs::remove_dir_all("TEST_ENSURE_DIRECTORY").unwrap();
/// ```
pub fn ensure_directory<P: AsRef<Path>>(directory: P) -> Result<PathBuf, SorrelError> {
    let directory = directory.as_ref();

    std::fs::create_dir_all(directory).map_err(|err| SorrelError::DirError(err.to_string()))?;

    Ok(directory.to_path_buf())
}

/// Recursively collect image paths beneath a directory in lexicographic order
///
/// Traversal order is stable across runs and platforms so that downstream
/// split assignment, which is keyed on the discovery index, is reproducible.
///
/// # Arguments
///
/// * `directory` - Root of the input image tree
///
/// # Examples
///
/// ```no_run
/// use sorrel_core::ut::path::collect_image_paths;
/// let files = collect_image_paths("images/").unwrap();
/// ```
pub fn collect_image_paths<P: AsRef<Path>>(directory: P) -> Result<Vec<PathBuf>, SorrelError> {
    let directory = directory.as_ref();

    if !directory.is_dir() {
        return Err(SorrelError::DirError(directory.display().to_string()));
    }

    let mut files: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(directory)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();

        if path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    let ext = ext.to_lowercase();
                    SUPPORTED_IMAGE_FORMATS.contains(&ext.as_str())
                })
        {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Path of the sidecar annotation paired with an image by matching stem
pub fn sidecar_path(image_path: &Path) -> PathBuf {
    image_path.with_extension(ANNOTATION_EXTENSION)
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_collect_image_paths_order_and_filter() {
        let root = Path::new("TEST_COLLECT_IMAGE_PATHS");

        std::fs::create_dir_all(root.join("b")).unwrap();
        std::fs::create_dir_all(root.join("a")).unwrap();

        for name in ["b/2.png", "a/1.jpg", "a/3.bmp", "a/notes.txt", "b/4.JPG"] {
            std::fs::write(root.join(name), b"x").unwrap();
        }

        let files = collect_image_paths(root).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();

        assert_eq!(names, vec!["a/1.jpg", "a/3.bmp", "b/2.png", "b/4.JPG"]);

        std::fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_collect_image_paths_missing_root() {
        assert!(collect_image_paths("TEST_DOES_NOT_EXIST/").is_err());
    }

    #[test]
    fn test_sidecar_path() {
        let sidecar = sidecar_path(Path::new("images/cart_001.jpg"));
        assert_eq!(sidecar, PathBuf::from("images/cart_001.json"));
    }
}
