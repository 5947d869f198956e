//! Renders the five banner sections to a writer, in fixed order.
//!
//! Each section is written as soon as its probe returns, so a failing probe
//! leaves the earlier sections on the output.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Sources;
use crate::probe::block::{self, BlockDevice, DevicePatterns};
use crate::probe::netdev::{self, NetDevice};
use crate::probe::{cpuinfo, procs};

/// Shortest round-trip float text, with the exponent written as a sign and at
/// least two digits (`1e-06`, `1e+16`) the way the banner has always shown it.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

pub fn write_cpu<W: Write>(out: &mut W, models: &[&str]) -> std::io::Result<()> {
    writeln!(out, "CPU:")?;
    for model in models {
        writeln!(out, "\t{model}")?;
    }
    Ok(())
}

pub fn write_ram<W: Write>(out: &mut W, gib: f64) -> std::io::Result<()> {
    writeln!(out, "RAM:")?;
    writeln!(out, "{}", format_float(gib))
}

pub fn write_lan<W: Write>(out: &mut W, devices: &[NetDevice]) -> std::io::Result<()> {
    writeln!(out, "LAN:")?;
    for dev in devices {
        writeln!(
            out,
            "\t{}: {} MiB {} MiB",
            dev.name,
            format_float(dev.rx_mib()),
            format_float(dev.tx_mib())
        )?;
    }
    Ok(())
}

pub fn write_processes<W: Write>(out: &mut W, count: usize) -> std::io::Result<()> {
    writeln!(out, " \nProcesses:")?;
    writeln!(out, "\tTotal count:: {count}\n")
}

pub fn write_block_devices<W: Write>(out: &mut W, devices: &[BlockDevice]) -> std::io::Result<()> {
    writeln!(out, "Block devices:")?;
    for dev in devices {
        writeln!(
            out,
            "Device:: {}, Size:: {} GiB",
            dev.path.display(),
            format_float(dev.size_gib)
        )?;
    }
    Ok(())
}

/// Run every probe against `sources` and write the banner.
///
/// `memory_gib` supplies the RAM figure so callers can swap out the sysconf query.
pub fn write_report<W, M>(
    out: &mut W,
    sources: &Sources,
    patterns: &DevicePatterns,
    memory_gib: M,
) -> Result<()>
where
    W: Write,
    M: FnOnce() -> crate::error::Result<f64>,
{
    let processors = cpuinfo::read_cpuinfo(&sources.cpuinfo())?;
    let models = cpuinfo::model_names(&processors)?;
    write_cpu(out, &models)?;

    let gib = memory_gib().context("failed to size physical memory")?;
    write_ram(out, gib)?;

    let devices = netdev::read_netdev(&sources.net_dev())?;
    write_lan(out, &devices)?;

    let pids = procs::pid_entries(&sources.proc_root)?;
    write_processes(out, pids.len())?;

    let block_devices = block::scan_block_devices(&sources.block_root, patterns)?;
    write_block_devices(out, &block_devices)?;

    out.flush()?;
    info!(
        processors = processors.len(),
        interfaces = devices.len(),
        processes = pids.len(),
        block_devices = block_devices.len(),
        "report complete"
    );
    Ok(())
}
