//! YAML Export functionality

use std::io::Write;

use super::json::MonthExport;
use crate::error::{HomeboxError, HomeboxResult};

/// Write `export` as YAML with a short comment header
pub fn export_month_yaml<W: Write>(export: &MonthExport, writer: &mut W) -> HomeboxResult<()> {
    writeln!(writer, "# homebox month report: {}", export.month)?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# Amounts are in cents")?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, export).map_err(|e| HomeboxError::Export(e.to_string()))?;

    Ok(())
}
