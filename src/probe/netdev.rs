use std::path::Path;

use tracing::debug;

use crate::error::{ProbeError, Result};

const MIB: f64 = (1u64 << 20) as f64;
const HEADER_LINES: usize = 2;
const LOOPBACK: &str = "lo";
// Field positions after the `iface:` prefix.
const RX_BYTES_FIELD: usize = 0;
const TX_BYTES_FIELD: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetDevice {
    pub name: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

impl NetDevice {
    pub fn rx_mib(&self) -> f64 {
        self.rx_bytes as f64 / MIB
    }

    pub fn tx_mib(&self) -> f64 {
        self.tx_bytes as f64 / MIB
    }
}

/// Parse `/proc/net/dev`, skipping the two header lines and the loopback interface.
pub fn parse_netdev(text: &str) -> Result<Vec<NetDevice>> {
    let mut devices = Vec::new();

    for line in text.lines().skip(HEADER_LINES) {
        if line.trim().is_empty() {
            continue;
        }
        let (name, counters) = line
            .split_once(':')
            .ok_or_else(|| ProbeError::malformed("net/dev line", line.trim()))?;
        let name = name.trim();
        if name == LOOPBACK {
            continue;
        }

        let fields: Vec<&str> = counters.split_whitespace().collect();
        devices.push(NetDevice {
            name: name.to_string(),
            rx_bytes: counter(&fields, RX_BYTES_FIELD, name)?,
            tx_bytes: counter(&fields, TX_BYTES_FIELD, name)?,
        });
    }

    Ok(devices)
}

fn counter(fields: &[&str], index: usize, iface: &str) -> Result<u64> {
    let raw = fields.get(index).ok_or_else(|| {
        ProbeError::malformed(
            "net/dev line",
            format!("{iface}: expected at least {} fields, got {}", index + 1, fields.len()),
        )
    })?;
    raw.parse().map_err(|_| {
        ProbeError::malformed(
            "net/dev counter",
            format!("{iface}: field {index} is not a byte count: {raw:?}"),
        )
    })
}

pub fn read_netdev(path: &Path) -> Result<Vec<NetDevice>> {
    let text = super::read_to_string(path)?;
    let devices = parse_netdev(&text)?;
    debug!(path = %path.display(), count = devices.len(), "parsed net/dev");
    Ok(devices)
}
