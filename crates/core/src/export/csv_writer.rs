//! CSV rendering: one file per table inside a destination directory.

use std::path::Path;

use tracing::debug;

use crate::error::{LockwatchError, Result};
use crate::report::DeviceReport;

use super::rows::{DeviceRow, SummaryTableRow, TableRow};
use super::{ReportRenderer, DEVICES_TABLE, SUMMARY_TABLE};

/// Writes `Devices.csv` and `Summary.csv` into the destination directory.
pub struct CsvRenderer;

impl ReportRenderer for CsvRenderer {
    fn render(&self, report: &DeviceReport, destination: &Path) -> Result<()> {
        std::fs::create_dir_all(destination).map_err(|e| {
            LockwatchError::Render(format!(
                "cannot create output directory {}: {e}",
                destination.display()
            ))
        })?;

        write_csv(
            &destination.join(format!("{DEVICES_TABLE}.csv")),
            report.devices.iter().map(DeviceRow::from_model),
        )?;
        write_csv(
            &destination.join(format!("{SUMMARY_TABLE}.csv")),
            report.summary.iter().map(SummaryTableRow::from_model),
        )?;

        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "csv"
    }
}

fn write_csv<R: TableRow>(path: &Path, rows: impl Iterator<Item = R>) -> Result<()> {
    let render_err =
        |e: csv::Error| LockwatchError::Render(format!("CSV write to {} failed: {e}", path.display()));

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(render_err)?;

    wtr.write_record(R::HEADERS).map_err(render_err)?;
    let mut written = 0usize;
    for row in rows {
        wtr.serialize(row).map_err(render_err)?;
        written += 1;
    }

    wtr.flush().map_err(|e| {
        LockwatchError::Render(format!("CSV flush to {} failed: {e}", path.display()))
    })?;
    debug!(path = %path.display(), rows = written, "Wrote CSV table");
    Ok(())
}
