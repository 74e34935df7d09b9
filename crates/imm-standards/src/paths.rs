//! Standards directory path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the standards directory.
pub const STANDARDS_ENV_VAR: &str = "IMM_STANDARDS_DIR";

pub const NIP_SCHEDULE_FILE: &str = "nip_schedule.json";
pub const IAP_SCHEDULE_FILE: &str = "iap_schedule.json";
pub const VOCABULARY_FILE: &str = "vocabulary.toml";

/// Get the standards root directory.
///
/// Resolution order:
/// 1. `IMM_STANDARDS_DIR` environment variable
/// 2. `standards/` directory relative to workspace root
pub fn standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

/// An explicit directory wins over [`standards_root`].
pub fn resolve_standards_root(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(standards_root, Path::to_path_buf)
}

pub fn nip_schedule_path(root: &Path) -> PathBuf {
    root.join(NIP_SCHEDULE_FILE)
}

pub fn iap_schedule_path(root: &Path) -> PathBuf {
    root.join(IAP_SCHEDULE_FILE)
}

pub fn vocabulary_path(root: &Path) -> PathBuf {
    root.join(VOCABULARY_FILE)
}
