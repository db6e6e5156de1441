//! Scan subcommand implementation.
//!
//! Handles `portprobe scan <host> <ports>`: a TCP probe of every port in
//! the list, in ascending order.

use crate::cli::{parse_host, Cli, OutputFormat, Reporter};
use crate::error::{CliError, CliResult};
use crate::output::{self, SweepRecord};
use crate::probe::{Probe, ProbeOutcome, ProbeReport, TcpProbe};
use crate::types::{PortSpec, ProbeTarget};
use clap::Parser;

/// Probe a host over a list of TCP ports.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Host name or IPv4 address to probe
    #[arg(value_name = "HOST", value_parser = parse_host)]
    pub host: String,

    /// Ports to probe (e.g., "80", "80,443", "8000-8010", "22,80,8000-9000")
    #[arg(value_name = "PORTS")]
    pub ports: String,
}

impl ScanCommand {
    pub async fn execute(&self, cli: &Cli) -> CliResult<SweepRecord> {
        let settings = cli.settings()?;
        let spec: PortSpec = self.ports.parse()?;
        let ports = spec.to_ports();
        if ports.is_empty() {
            return Err(CliError::NoPorts);
        }

        let targets = ports
            .into_iter()
            .map(|port| ProbeTarget::new(self.host.as_str(), port, settings.timeout()))
            .collect::<Result<Vec<_>, _>>()?;

        if !cli.quiet && cli.output == OutputFormat::Plain {
            output::print_sweep_header(1, targets.len(), settings.timeout_ms);
        }

        let probe = TcpProbe::new();
        let mut reporter = Reporter::new(cli.output, cli.quiet, targets.len());
        for target in &targets {
            reporter.set_message(target.to_string());
            let status = probe.probe(target).await;
            reporter.record(ProbeReport::new(target, ProbeOutcome::Tcp { status }))?;
        }
        reporter.finish()
    }
}
