//! Collects reports while probes run and renders them through `output`.

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output::{self, SweepRecord};
use crate::probe::ProbeReport;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

/// Streams plain lines as reports arrive; structured formats are written
/// once every probe has returned.
pub struct Reporter {
    format: OutputFormat,
    quiet: bool,
    progress: Option<ProgressBar>,
    record: SweepRecord,
    reports: Vec<ProbeReport>,
}

impl Reporter {
    /// `total` is the number of probes that will be recorded.
    pub fn new(format: OutputFormat, quiet: bool, total: usize) -> Self {
        let progress = (!quiet && Term::stderr().is_term()).then(|| progress_bar(total));
        Self {
            format,
            quiet,
            progress,
            record: SweepRecord::new(),
            reports: Vec::with_capacity(total),
        }
    }

    pub fn set_message(&self, message: String) {
        if let Some(pb) = &self.progress {
            pb.set_message(message);
        }
    }

    pub fn record(&mut self, report: ProbeReport) -> CliResult<()> {
        if self.format == OutputFormat::Plain {
            match &self.progress {
                Some(pb) => pb.suspend(|| output::print_report(&report))?,
                None => output::print_report(&report)?,
            }
        }
        if let Some(pb) = &self.progress {
            pb.inc(1);
        }
        self.reports.push(report);
        Ok(())
    }

    /// Close the record and write any structured output.
    pub fn finish(self) -> CliResult<SweepRecord> {
        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }

        let record = self.record.finalize(self.reports);
        match self.format {
            OutputFormat::Plain if !self.quiet => output::print_summary(&record),
            OutputFormat::Plain => {}
            OutputFormat::Json => output::print_json(&record)?,
            OutputFormat::Csv => output::print_csv(&record)?,
        }
        Ok(record)
    }
}

fn progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}
