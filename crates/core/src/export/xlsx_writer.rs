//! Workbook rendering: both tables as worksheets of one `.xlsx` file.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::debug;

use crate::error::{LockwatchError, Result};
use crate::report::DeviceReport;

use super::rows::{CellValue, DeviceRow, SummaryTableRow, TableRow};
use super::{ReportRenderer, DEVICES_TABLE, SUMMARY_TABLE};

/// Writes a single workbook with a "Devices" and a "Summary" worksheet.
pub struct XlsxRenderer;

impl ReportRenderer for XlsxRenderer {
    fn render(&self, report: &DeviceReport, destination: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        write_sheet(
            workbook.add_worksheet(),
            DEVICES_TABLE,
            &header,
            report.devices.iter().map(DeviceRow::from_model),
        )?;
        write_sheet(
            workbook.add_worksheet(),
            SUMMARY_TABLE,
            &header,
            report.summary.iter().map(SummaryTableRow::from_model),
        )?;

        workbook.save(destination).map_err(|e| {
            LockwatchError::Render(format!(
                "cannot write workbook {}: {e}",
                destination.display()
            ))
        })?;
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "xlsx"
    }
}

fn render_error(sheet: &str) -> impl Fn(XlsxError) -> LockwatchError + '_ {
    move |e| LockwatchError::Render(format!("worksheet {sheet}: {e}"))
}

fn write_sheet<R: TableRow>(
    sheet: &mut Worksheet,
    name: &str,
    header: &Format,
    rows: impl Iterator<Item = R>,
) -> Result<()> {
    sheet.set_name(name).map_err(render_error(name))?;

    for (col, title) in R::HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *title, header)
            .map_err(render_error(name))?;
    }

    let mut written = 0u32;
    for row in rows {
        written += 1;
        for (col, cell) in row.cells().into_iter().enumerate() {
            let col = col as u16;
            let result = match cell {
                CellValue::Empty => continue,
                CellValue::Text(text) => sheet.write_string(written, col, text.as_str()),
                CellValue::Number(n) => sheet.write_number(written, col, n),
                CellValue::Bool(b) => sheet.write_boolean(written, col, b),
            };
            result.map_err(render_error(name))?;
        }
    }

    sheet.set_freeze_panes(1, 0).map_err(render_error(name))?;
    sheet.autofit();

    debug!(sheet = name, rows = written, "Wrote worksheet");
    Ok(())
}
