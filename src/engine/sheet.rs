//! XLSX backend: `calamine` worksheets rendered as Markdown pipe tables.

use super::{EngineError, EngineResult};
use calamine::{Data, Reader, Xlsx, open_workbook};
use std::path::Path;

/// Render every non-empty worksheet as a `## <sheet>` section containing
/// a pipe table. The first row of the sheet is used as the table header.
pub fn to_markdown(path: &Path) -> EngineResult<String> {
    // the closure's parameter type is resolved before `Xlsx<_>` pins the
    // reader, so the error type must be spelled out
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e: calamine::XlsxError| EngineError::Spreadsheet(e.to_string()))?;

    let names = workbook.sheet_names().to_owned();
    let mut out = String::new();

    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| EngineError::Spreadsheet(e.to_string()))?;
        if range.is_empty() {
            continue;
        }

        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("## {}\n\n", name));
        out.push_str(&render_table(range.rows()));
    }

    Ok(out)
}

fn render_table<'a, I>(mut rows: I) -> String
where
    I: Iterator<Item = &'a [Data]>,
{
    let mut out = String::new();

    let Some(header) = rows.next() else {
        return out;
    };
    push_row(&mut out, header);
    out.push('|');
    for _ in header {
        out.push_str(" --- |");
    }
    out.push('\n');

    for row in rows {
        push_row(&mut out, row);
    }
    out
}

fn push_row(out: &mut String, row: &[Data]) {
    out.push('|');
    for cell in row {
        out.push(' ');
        out.push_str(&escape_cell(&cell.to_string()));
        out.push_str(" |");
    }
    out.push('\n');
}

/// Pipe and newline characters would break table syntax.
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}
