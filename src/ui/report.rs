// OilLog - ui/report.rs
//
// Plain-text presentation of a parsed log: vehicle header, oil change
// table and estimate line. Writes to any Write trait object.

use crate::core::estimator;
use crate::core::model::{LogSummary, NewEntry, VehicleLog};
use std::io::{self, Write};

const HEADERS: [&str; 4] = ["Mileage", "Date", "Oil Type", "Filter Type"];

/// Render the full report shown after every parse.
pub fn render_report<W: Write>(
    log: &VehicleLog,
    estimate: Option<i64>,
    unknown_label: &str,
    mut out: W,
) -> io::Result<()> {
    writeln!(out, "Vehicle: {}", log.vehicle_label())?;
    writeln!(out)?;

    if log.records.is_empty() {
        writeln!(out, "No oil changes found in the selected file.")?;
    } else {
        render_table(log, unknown_label, &mut out)?;
    }

    writeln!(out)?;
    match estimator::average_miles_per_day(&log.records) {
        Some(rate) => writeln!(out, "Average Miles Per Day: {rate:.1}")?,
        None => writeln!(out, "Average Miles Per Day: {unknown_label}")?,
    }
    render_estimate(estimate, unknown_label, &mut out)
}

/// Confirmation printed after an append. `summary` is taken from the
/// re-parsed log, so its date is the section the new entry joined.
pub fn render_added<W: Write>(
    entry: &NewEntry,
    summary: &LogSummary,
    unknown_label: &str,
    mut out: W,
) -> io::Result<()> {
    writeln!(
        out,
        "New oil change entry added successfully: {}",
        entry.to_log_line()
    )?;
    let date = if summary.last_date.is_empty() {
        unknown_label
    } else {
        summary.last_date.as_str()
    };
    writeln!(out, "Date: {date}")?;
    writeln!(out)
}

/// Render only the estimate line.
pub fn render_estimate<W: Write>(
    estimate: Option<i64>,
    unknown_label: &str,
    mut out: W,
) -> io::Result<()> {
    match estimate {
        Some(miles) => writeln!(out, "Estimated Current Mileage: {miles}"),
        None => writeln!(out, "Estimated Current Mileage: {unknown_label}"),
    }
}

fn render_table<W: Write>(log: &VehicleLog, unknown_label: &str, out: &mut W) -> io::Result<()> {
    let rows: Vec<[String; 4]> = log
        .records
        .iter()
        .map(|r| {
            let or_unknown = |v: &Option<String>| v.as_deref().unwrap_or(unknown_label).to_string();
            [
                r.mileage.to_string(),
                or_unknown(&r.date),
                or_unknown(&r.oil_type),
                or_unknown(&r.filter_type),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &HEADERS, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("-+-"))?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write, S: AsRef<str>>(out: &mut W, cells: &[S; 4], widths: &[usize; 4]) -> io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect();
    writeln!(out, "{}", padded.join(" | ").trim_end())
}
