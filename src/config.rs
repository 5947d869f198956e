use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::probe::block::DEFAULT_PATTERNS;

// ---------------------------------------------------------------------------
// Sources: where the probes read from
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sources {
    pub proc_root: PathBuf,
    pub block_root: PathBuf,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            block_root: PathBuf::from("/sys/block"),
        }
    }
}

impl Sources {
    pub fn cpuinfo(&self) -> PathBuf {
        self.proc_root.join("cpuinfo")
    }

    pub fn net_dev(&self) -> PathBuf {
        self.proc_root.join("net").join("dev")
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub sources: Sources,
    pub device_patterns: Vec<String>,
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: Sources::default(),
            device_patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            log_level: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    log_level: Option<String>,
    paths: Option<RawPaths>,
    block: Option<RawBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPaths {
    proc_root: Option<PathBuf>,
    block_root: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RawBlock {
    patterns: Option<Vec<String>>,
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("sysbanner").join("config.toml"))
        .unwrap_or_default()
}

impl Config {
    /// Load from `path`, or the per-user config file when `None`.
    ///
    /// A missing file yields the defaults. So does an unparsable one, after a
    /// note on stderr; logging is not up yet at this point.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };

        match Self::from_toml(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("sysbanner: invalid config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let raw: RawConfig = toml::from_str(content)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let mut config = Self::default();

        if let Some(p) = raw.paths {
            if let Some(root) = p.proc_root {
                config.sources.proc_root = root;
            }
            if let Some(root) = p.block_root {
                config.sources.block_root = root;
            }
        }

        if let Some(patterns) = raw.block.and_then(|b| b.patterns) {
            config.device_patterns = patterns;
        }

        config.log_level = raw.log_level;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources() {
        let sources = Sources::default();
        assert_eq!(sources.cpuinfo(), PathBuf::from("/proc/cpuinfo"));
        assert_eq!(sources.net_dev(), PathBuf::from("/proc/net/dev"));
        assert_eq!(sources.block_root, PathBuf::from("/sys/block"));
    }

    #[test]
    fn test_default_patterns() {
        assert_eq!(Config::default().device_patterns, vec!["sd.*", "mmcblk*"]);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_full_toml() {
        let config = Config::from_toml(
            r#"
log_level = "debug"

[paths]
proc_root = "/host/proc"
block_root = "/host/sys/block"

[block]
patterns = ["nvme.*", "vd.*"]
"#,
        )
        .unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.sources.proc_root, PathBuf::from("/host/proc"));
        assert_eq!(config.sources.block_root, PathBuf::from("/host/sys/block"));
        assert_eq!(config.sources.cpuinfo(), PathBuf::from("/host/proc/cpuinfo"));
        assert_eq!(config.device_patterns, vec!["nvme.*", "vd.*"]);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = Config::from_toml("[paths]\nblock_root = \"/tmp/block\"\n").unwrap();
        assert_eq!(config.sources.proc_root, PathBuf::from("/proc"));
        assert_eq!(config.sources.block_root, PathBuf::from("/tmp/block"));
        assert_eq!(config.device_patterns, Config::default().device_patterns);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml("[paths\nproc_root = 3").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("config.toml").as_path()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "log_level = [").unwrap();
        assert_eq!(Config::load(Some(path.as_path())), Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[block]\npatterns = [\"vd.*\"]\n").unwrap();
        assert_eq!(Config::load(Some(path.as_path())).device_patterns, vec!["vd.*"]);
    }
}
