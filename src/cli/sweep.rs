//! Sweep subcommand implementation.
//!
//! Probes every host against every configured port, routing each port by
//! its protocol label. Probes run one at a time, hosts in the order given
//! and ports in configuration order.

use crate::cli::{parse_host, Cli, OutputFormat, Reporter};
use crate::error::CliResult;
use crate::output::{self, SweepRecord};
use crate::probe::{Dispatcher, ProbeKind, TlsEngine};
use crate::types::ProbeTarget;
use clap::Parser;
use tracing::error;

/// Probe every configured host on every configured port.
#[derive(Parser, Debug, Default)]
pub struct SweepCommand {
    /// Host to probe instead of the configured list (repeatable)
    #[arg(long = "host", value_name = "HOST", value_parser = parse_host)]
    pub hosts: Vec<String>,
}

impl SweepCommand {
    pub async fn execute(&self, cli: &Cli) -> CliResult<SweepRecord> {
        let settings = cli.settings()?;
        let hosts = if self.hosts.is_empty() {
            &settings.hosts
        } else {
            &self.hosts
        };

        let mut jobs = Vec::with_capacity(hosts.len() * settings.ports.len());
        for host in hosts {
            for port in &settings.ports {
                let target = ProbeTarget::new(host.as_str(), port.port, settings.timeout())?;
                jobs.push((target, port));
            }
        }

        let needs_tls = settings
            .ports
            .iter()
            .any(|port| port.probe_kind() == ProbeKind::Tls);
        let engine = if needs_tls {
            TlsEngine::shared()
                .map_err(|err| error!(error = %err, "TLS engine unavailable"))
                .ok()
        } else {
            None
        };
        let dispatcher = Dispatcher::new(engine);

        if !cli.quiet && cli.output == OutputFormat::Plain {
            output::print_sweep_header(hosts.len(), settings.ports.len(), settings.timeout_ms);
        }

        let mut reporter = Reporter::new(cli.output, cli.quiet, jobs.len());
        for (target, port) in &jobs {
            reporter.set_message(format!("{} ({})", target, port.protocol));
            let report = dispatcher
                .dispatch(target, port.probe_kind())
                .await
                .with_protocol(port.protocol.as_str());
            reporter.record(report)?;
        }
        reporter.finish()
    }
}
