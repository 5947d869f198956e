use nix::unistd::{sysconf, SysconfVar};
use tracing::debug;

use crate::error::{ProbeError, Result};

const GIB: f64 = (1u64 << 30) as f64;

pub fn memory_gib(page_size: u64, phys_pages: u64) -> f64 {
    page_size as f64 * phys_pages as f64 / GIB
}

/// Total physical memory in GiB, from the page size and physical page count.
pub fn total_memory_gib() -> Result<f64> {
    let page_size = query(SysconfVar::PAGE_SIZE, "_SC_PAGE_SIZE")?;
    let phys_pages = query(SysconfVar::_PHYS_PAGES, "_SC_PHYS_PAGES")?;
    debug!(page_size, phys_pages, "queried physical memory");
    Ok(memory_gib(page_size, phys_pages))
}

fn query(var: SysconfVar, name: &'static str) -> Result<u64> {
    match sysconf(var) {
        Ok(Some(v)) => u64::try_from(v)
            .map_err(|_| ProbeError::Sysconf(name, format!("negative value {v}"))),
        Ok(None) => Err(ProbeError::Sysconf(name, "not supported".to_string())),
        Err(e) => Err(ProbeError::Sysconf(name, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_gib() {
        let gib = memory_gib(4096, 1_000_000);
        assert!((gib - 3.814697265625).abs() < 1e-6);
    }

    #[test]
    fn test_memory_gib_exact_power() {
        assert_eq!(memory_gib(4096, 262_144), 1.0);
        assert_eq!(memory_gib(4096, 0), 0.0);
    }

    #[test]
    fn test_total_memory_is_positive() {
        let gib = total_memory_gib().unwrap();
        assert!(gib > 0.0);
        assert_eq!(gib, total_memory_gib().unwrap());
    }
}
