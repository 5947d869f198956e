mod config;
mod error;
mod logging;
mod probe;
mod report;

use std::path::PathBuf;

use clap::Parser;
use config::Config;
use probe::block::DevicePatterns;

#[derive(Parser)]
#[command(
    name = "sysbanner",
    version,
    about = "Print a one-shot summary of CPU, RAM, network, processes and block devices"
)]
struct Cli {
    /// Config file (defaults to the per-user sysbanner/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Root of the proc filesystem
    #[arg(long, value_name = "DIR")]
    proc_root: Option<PathBuf>,
    /// Directory holding one entry per block device
    #[arg(long, value_name = "DIR")]
    block_root: Option<PathBuf>,
    /// Block device name pattern, matched at the start of the name (repeatable)
    #[arg(short, long = "pattern", value_name = "REGEX")]
    patterns: Vec<String>,
    /// Increase log verbosity on stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(root) = self.proc_root {
            config.sources.proc_root = root;
        }
        if let Some(root) = self.block_root {
            config.sources.block_root = root;
        }
        if !self.patterns.is_empty() {
            config.device_patterns = self.patterns;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref());
    logging::init(config.log_level.as_deref(), cli.verbose)?;
    cli.apply(&mut config);

    let patterns = DevicePatterns::new(config.device_patterns.as_slice())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::write_report(
        &mut out,
        &config.sources,
        &patterns,
        probe::memory::total_memory_gib,
    )
}
