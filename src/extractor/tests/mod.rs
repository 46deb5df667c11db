mod adjust_tests;
mod grid_tests;

use std::path::PathBuf;

/// Fresh scratch directory under the system temp dir
pub(crate) fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("gprkit_extractor_tests").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
