//! Maps input paths into the mirrored output tree.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Canonical container every output is written as.
pub const OUTPUT_EXTENSION: &str = "mp4";

#[derive(Debug)]
pub enum MapError {
    /// The input path is not rooted under the configured input directory.
    OutsideRoot(PathBuf),
    Io(std::io::Error),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::OutsideRoot(path) => {
                write!(f, "{} is not under the input directory", path.display())
            }
            MapError::Io(e) => write!(f, "Failed to prepare output directory: {}", e),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::OutsideRoot(_) => None,
            MapError::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for MapError {
    fn from(err: std::io::Error) -> Self {
        MapError::Io(err)
    }
}

/// Derive the output path for `input` by swapping the root prefix and
/// forcing the canonical container extension, then make sure every ancestor
/// directory exists. Directory creation is idempotent, so concurrent
/// callers racing on a shared subtree are fine.
pub fn map_output_path(
    input: &Path,
    input_root: &Path,
    output_root: &Path,
) -> Result<PathBuf, MapError> {
    let relative = input
        .strip_prefix(input_root)
        .map_err(|_| MapError::OutsideRoot(input.to_path_buf()))?;

    let mut output = output_root.join(relative);
    output.set_extension(OUTPUT_EXTENSION);

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_maps_relative_structure_and_extension() {
        let dir = tempdir().unwrap();
        let input_root = dir.path().join("input");
        let output_root = dir.path().join("output");

        let mapped =
            map_output_path(&input_root.join("a/b/clip.mov"), &input_root, &output_root).unwrap();

        assert_eq!(mapped, output_root.join("a/b/clip.mp4"));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let input_root = dir.path().join("input");
        let output_root = dir.path().join("output");

        let mapped =
            map_output_path(&input_root.join("a/b/clip.mov"), &input_root, &output_root).unwrap();

        assert!(mapped.parent().unwrap().is_dir());
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let dir = tempdir().unwrap();
        let input_root = dir.path().join("input");
        let output_root = dir.path().join("output");
        let input = input_root.join("clip.mp4");

        let first = map_output_path(&input, &input_root, &output_root).unwrap();
        let second = map_output_path(&input, &input_root, &output_root).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_input_outside_root_is_rejected() {
        let dir = tempdir().unwrap();
        let input_root = dir.path().join("input");
        let output_root = dir.path().join("output");

        let result = map_output_path(
            &dir.path().join("elsewhere/clip.mov"),
            &input_root,
            &output_root,
        );

        match result {
            Err(MapError::OutsideRoot(path)) => {
                assert!(path.ends_with("elsewhere/clip.mov"));
            }
            other => panic!("Expected OutsideRoot, got {:?}", other),
        }
    }

    #[test]
    fn test_mp4_input_keeps_mp4_extension() {
        let dir = tempdir().unwrap();
        let input_root = dir.path().join("input");
        let output_root = dir.path().join("output");

        let mapped =
            map_output_path(&input_root.join("clip.mp4"), &input_root, &output_root).unwrap();

        assert_eq!(mapped, output_root.join("clip.mp4"));
    }
}
