use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::error::{ProbeError, Result};

const GIB: f64 = (1u64 << 30) as f64;

pub const DEFAULT_PATTERNS: &[&str] = &["sd.*", "mmcblk*"];

#[derive(Clone, Debug, PartialEq)]
pub struct BlockDevice {
    pub path: PathBuf,
    pub size_gib: f64,
}

/// Device name patterns, matched against the start of the name only.
///
/// `mmcblk*` is a regex, not a glob: it matches any name starting with `mmcbl`.
#[derive(Clone, Debug)]
pub struct DevicePatterns {
    patterns: Vec<Regex>,
}

impl DevicePatterns {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(&format!("^(?:{p})")).map_err(|source| ProbeError::Pattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Number of patterns that match `name`.
    pub fn match_count(&self, name: &str) -> usize {
        self.patterns.iter().filter(|re| re.is_match(name)).count()
    }
}

fn read_number(path: &Path) -> Result<u64> {
    let raw = super::read_to_string(path)?;
    let raw = raw.trim_end();
    raw.parse().map_err(|_| {
        ProbeError::malformed("block device attribute", format!("{}: {raw:?}", path.display()))
    })
}

/// Capacity in GiB from `<dir>/size` and `<dir>/queue/hw_sector_size`.
pub fn device_size_gib(dir: &Path) -> Result<f64> {
    let sectors = read_number(&dir.join("size"))?;
    let sector_size = read_number(&dir.join("queue").join("hw_sector_size"))?;
    Ok(sectors as f64 * sector_size as f64 / GIB)
}

/// Every device under `root` whose name matches a pattern, sorted by path.
/// Hidden entries are skipped, as a `root/*` glob would.
///
/// A device matched by several patterns is reported once per match.
pub fn scan_block_devices(root: &Path, patterns: &DevicePatterns) -> Result<Vec<BlockDevice>> {
    let mut dirs = std::fs::read_dir(root)
        .map_err(|e| ProbeError::read(root, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| ProbeError::read(root, e))?;
    dirs.sort();

    let mut devices = Vec::new();
    for dir in dirs {
        let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        for _ in 0..patterns.match_count(name) {
            let size_gib = device_size_gib(&dir)?;
            devices.push(BlockDevice {
                path: dir.clone(),
                size_gib,
            });
        }
    }

    debug!(root = %root.display(), count = devices.len(), "scanned block devices");
    Ok(devices)
}
