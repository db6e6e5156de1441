//! JSON output formatting.

use crate::error::CliResult;
use crate::output::SweepRecord;
use std::io::{self, Write};

/// Write the record as pretty-printed JSON.
pub fn write_json<W: Write>(record: &SweepRecord, out: &mut W) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, record)?;
    writeln!(out)?;
    Ok(())
}

/// Print the record as JSON to stdout.
pub fn print_json(record: &SweepRecord) -> CliResult<()> {
    let stdout = io::stdout();
    write_json(record, &mut stdout.lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::record::fixtures::{certificate, tcp, tls};
    use crate::probe::PortStatus;
    use serde_json::Value;

    #[test]
    fn test_json_shape() {
        let record = SweepRecord::new().finalize(vec![
            tcp("127.0.0.1", 22, Some("SSH"), PortStatus::Open),
            tls("example.com", 443, certificate()),
        ]);
        let mut out = Vec::new();
        write_json(&record, &mut out).unwrap();

        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["probed"], 2);
        assert_eq!(value["open_ports"], 1);

        let tcp = &value["reports"][0];
        assert_eq!(tcp["probe"], "tcp");
        assert_eq!(tcp["port"], 22);
        assert_eq!(tcp["protocol"], "SSH");
        assert_eq!(tcp["status"], "OPEN");

        let tls = &value["reports"][1];
        assert_eq!(tls["probe"], "tls");
        assert_eq!(tls["certificate"]["valid"], true);
        assert_eq!(tls["certificate"]["issuer"], "/O=Example CA/CN=Example Root");
    }

    #[test]
    fn test_unlabelled_report_omits_protocol() {
        let record = SweepRecord::new().finalize(vec![tcp("h", 80, None, PortStatus::Closed)]);
        let mut out = Vec::new();
        write_json(&record, &mut out).unwrap();

        let value: Value = serde_json::from_slice(&out).unwrap();
        assert!(value["reports"][0].get("protocol").is_none());
    }
}
