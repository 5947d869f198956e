//! Readers for the kernel pseudo-files the banner reports on.
//!
//! Each submodule owns exactly one file format and exposes a pure `parse_*`
//! function over the text plus a thin `read_*` wrapper that does the I/O.

pub mod block;
pub mod cpuinfo;
pub mod memory;
pub mod netdev;
pub mod procs;

use std::path::Path;

use crate::error::{ProbeError, Result};

pub(crate) fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ProbeError::read(path, e))
}
