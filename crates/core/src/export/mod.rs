//! Report rendering: writes the "Devices" and "Summary" tables to disk.

pub mod csv_writer;
pub mod rows;
pub mod xlsx_writer;

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::report::DeviceReport;

pub use csv_writer::CsvRenderer;
pub use xlsx_writer::XlsxRenderer;

/// Name of the per-device table.
pub const DEVICES_TABLE: &str = "Devices";
/// Name of the aggregated table.
pub const SUMMARY_TABLE: &str = "Summary";

/// Writes both report tables to a destination.
pub trait ReportRenderer {
    fn render(&self, report: &DeviceReport, destination: &Path) -> Result<()>;
    fn format_name(&self) -> &'static str;
}

/// Pick a renderer from the destination: `.xlsx` files get a workbook,
/// anything else is treated as a directory of CSV files.
pub fn renderer_for(destination: &Path) -> Box<dyn ReportRenderer> {
    let is_xlsx = destination
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));

    if is_xlsx {
        Box::new(XlsxRenderer)
    } else {
        Box::new(CsvRenderer)
    }
}

/// Render `report` to `destination` with the renderer matching its extension.
pub fn write_report(report: &DeviceReport, destination: &Path) -> Result<()> {
    let renderer = renderer_for(destination);
    info!(
        path = %destination.display(),
        format = renderer.format_name(),
        devices = report.devices.len(),
        summary_rows = report.summary.len(),
        "Writing report"
    );
    renderer.render(report, destination)
}
