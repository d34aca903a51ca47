//! Input expansion for batch commands.
//!
//! Files are taken as given; directories are walked for image files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{FaceError, Result};

/// Extensions treated as images when walking a directory.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "tif", "tiff"];

/// Whether `path` has an image extension (case-insensitive).
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Expand `paths` into a sorted, de-duplicated list of image files.
///
/// Directories contribute their direct image children, or every nested
/// image when `recursive` is set. Explicit file paths are kept whatever
/// their extension so the decoder can report on them.
pub fn collect_inputs(paths: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let depth = if recursive { usize::MAX } else { 1 };
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .max_depth(depth)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_image(e.path()))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(FaceError::Io {
                path: path.clone(),
                message: "No such file or directory".to_string(),
            });
        }
    }

    let mut seen = std::collections::HashSet::new();
    files.retain(|p| seen.insert(p.clone()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("face.jpg")));
        assert!(is_image(Path::new("face.JPEG")));
        assert!(is_image(Path::new("dir/face.png")));
        assert!(!is_image(Path::new("notes.txt")));
        assert!(!is_image(Path::new("README")));
    }

    #[test]
    fn test_collect_flat_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.png"), b"").unwrap();
        fs::write(dir.path().join("a.jpg"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.png"), b"").unwrap();

        let files = collect_inputs(&[dir.path().to_path_buf()], false).unwrap();

        assert_eq!(
            files,
            vec![dir.path().join("a.jpg"), dir.path().join("b.png")]
        );
    }

    #[test]
    fn test_collect_recursive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.png"), b"").unwrap();

        let files = collect_inputs(&[dir.path().to_path_buf()], true).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.contains(&dir.path().join("nested/c.png")));
    }

    #[test]
    fn test_explicit_files_kept_and_deduplicated() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("portrait.raw");
        fs::write(&file, b"").unwrap();

        let files = collect_inputs(&[file.clone(), file.clone()], false).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_missing_path_errors() {
        let dir = tempdir().unwrap();
        let err = collect_inputs(&[dir.path().join("nope.jpg")], false).unwrap_err();
        assert!(matches!(err, FaceError::Io { .. }));
    }
}
