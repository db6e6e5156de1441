//! Output formatting module.
//!
//! Plain text is written one report at a time as probes return; JSON and
//! CSV render a finished [`SweepRecord`].

mod csv_format;
mod json_format;
mod plain;
mod record;

pub use csv_format::{print_csv, write_csv};
pub use json_format::{print_json, write_json};
pub use plain::{
    print_error, print_report, print_success, print_summary, print_sweep_header, report_line,
    write_report,
};
pub use record::SweepRecord;
