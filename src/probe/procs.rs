use std::path::Path;

use tracing::debug;

use crate::error::{ProbeError, Result};

fn is_pid(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

/// Names of the purely numeric entries under `root`, in listing order.
pub fn pid_entries(root: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(root).map_err(|e| ProbeError::read(root, e))?;

    let mut pids = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ProbeError::read(root, e))?;
        if let Some(name) = entry.file_name().to_str() {
            if is_pid(name) {
                pids.push(name.to_string());
            }
        }
    }

    debug!(root = %root.display(), count = pids.len(), "listed processes");
    Ok(pids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_is_pid() {
        assert!(is_pid("1"));
        assert!(is_pid("40213"));
        assert!(!is_pid(""));
        assert!(!is_pid("123x"));
        assert!(!is_pid("self"));
        assert!(!is_pid("-1"));
    }

    #[test]
    fn test_pid_entries_filters_numeric() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["1", "2", "abc", "123x"] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }

        let pids: HashSet<String> = pid_entries(dir.path()).unwrap().into_iter().collect();
        let expected: HashSet<String> = ["1", "2"].iter().map(|s| s.to_string()).collect();
        assert_eq!(pids, expected);
    }

    #[test]
    fn test_pid_entries_includes_plain_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("42"), "").unwrap();
        std::fs::write(dir.path().join("uptime"), "").unwrap();

        assert_eq!(pid_entries(dir.path()).unwrap(), vec!["42"]);
    }

    #[test]
    fn test_pid_entries_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(pid_entries(&dir.path().join("nope")).is_err());
    }
}
