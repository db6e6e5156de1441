//! Plain text output formatting.
//!
//! One line per probed pair, followed by an optional styled summary.

use crate::output::SweepRecord;
use crate::probe::ProbeReport;
use console::style;
use std::io::{self, Write};

/// Render one report as a single line.
///
/// TCP: `Host: h Port: p (LABEL) Status: OPEN`
/// TLS: `Host: h Port: p (LABEL) Cert valid: yes Subject: .. Issuer: .. Expiry: .. Self-signed: no`
///
/// The `(LABEL)` part appears only when the port came from configuration.
pub fn report_line(report: &ProbeReport) -> String {
    let mut line = format!("Host: {} Port: {}", report.host, report.port);
    if let Some(protocol) = &report.protocol {
        line.push_str(&format!(" ({})", protocol));
    }

    if let Some(status) = report.status() {
        line.push_str(&format!(" Status: {}", status));
    } else if let Some(cert) = report.certificate() {
        line.push_str(&format!(
            " Cert valid: {} Subject: {} Issuer: {} Expiry: {} Self-signed: {}",
            yes_no(cert.valid),
            cert.subject,
            cert.issuer,
            cert.not_after,
            yes_no(cert.self_signed)
        ));
    }
    line
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Write one report line to `out`.
pub fn write_report<W: Write>(report: &ProbeReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", report_line(report))
}

/// Print one report line to stdout.
pub fn print_report(report: &ProbeReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(report, &mut out)
}

/// Print a header before probing begins.
pub fn print_sweep_header(hosts: usize, ports: usize, timeout_ms: u64) {
    eprintln!();
    eprintln!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("portprobe").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    eprintln!(
        "{} Probing {} host(s) x {} port(s), timeout {} ms",
        style("•").dim(),
        style(hosts).white().bold(),
        style(ports).white().bold(),
        timeout_ms
    );
    eprintln!();
}

/// Print the tallies of a finished sweep.
pub fn print_summary(record: &SweepRecord) {
    eprintln!();
    eprintln!(
        "{} {} probes in {:.2}s: {} open, {} closed, {} filtered, {} valid certificate(s)",
        style("Summary:").bold(),
        record.probed,
        record.duration_ms as f64 / 1000.0,
        style(record.open_ports).green().bold(),
        style(record.closed_ports).red(),
        style(record.filtered_ports).yellow(),
        style(record.valid_certificates).green()
    );
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    eprintln!("{} {}", style("✓").green().bold(), msg);
}
