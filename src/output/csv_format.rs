//! CSV output formatting.

use crate::error::CliResult;
use crate::output::SweepRecord;
use std::io::{self, Write};

const HEADER: [&str; 10] = [
    "host",
    "port",
    "protocol",
    "probe",
    "status",
    "cert_valid",
    "subject",
    "issuer",
    "not_after",
    "self_signed",
];

/// Write one row per report. Columns that do not apply to a probe stay empty.
pub fn write_csv<W: Write>(record: &SweepRecord, out: W) -> CliResult<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADER)?;

    for report in &record.reports {
        let port = report.port.to_string();
        let protocol = report.protocol.as_deref().unwrap_or("");
        let row: [&str; 10] = match (report.status(), report.certificate()) {
            (Some(status), _) => [
                report.host.as_str(),
                port.as_str(),
                protocol,
                "tcp",
                status.as_str(),
                "",
                "",
                "",
                "",
                "",
            ],
            (None, Some(cert)) => [
                report.host.as_str(),
                port.as_str(),
                protocol,
                "tls",
                "",
                bool_str(cert.valid),
                cert.subject.as_str(),
                cert.issuer.as_str(),
                cert.not_after.as_str(),
                bool_str(cert.self_signed),
            ],
            (None, None) => continue,
        };
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

fn bool_str(flag: bool) -> &'static str {
    if flag {
        "true"
    } else {
        "false"
    }
}

/// Print the record as CSV to stdout.
pub fn print_csv(record: &SweepRecord) -> CliResult<()> {
    let stdout = io::stdout();
    write_csv(record, stdout.lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::record::fixtures::{certificate, tcp, tls};
    use crate::probe::PortStatus;

    #[test]
    fn test_csv_rows() {
        let record = SweepRecord::new().finalize(vec![
            tcp("127.0.0.1", 22, Some("SSH"), PortStatus::Filtered),
            tls("example.com", 443, certificate()),
        ]);
        let mut out = Vec::new();
        write_csv(&record, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "host,port,protocol,probe,status,cert_valid,subject,issuer,not_after,self_signed"
        );
        assert_eq!(lines[1], "127.0.0.1,22,SSH,tcp,FILTERED,,,,,");
        assert_eq!(
            lines[2],
            "example.com,443,HTTPS,tls,,true,/O=Example/CN=example.com,\
             /O=Example CA/CN=Example Root,Jan  1 00:00:00 2030 GMT,false"
        );
    }
}
