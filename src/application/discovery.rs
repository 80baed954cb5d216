//! Recursive discovery of candidate input files.

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Collect every regular file under `root` whose extension is on the
/// allow-list. Extension matching is case-sensitive. Results are sorted so
/// logs stay deterministic; no consumer depends on the order.
pub fn find_video_files(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or(false);
        if matches {
            files.push(entry.into_path());
        }
    }

    files.sort();
    files
}
