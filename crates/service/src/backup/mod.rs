//! Backup codec: structured (JSON) export/import and tabular (XLSX) export.

mod structured;
mod tabular;

use chrono::NaiveDate;
use mala_counter_core::CoreError;
use thiserror::Error;

pub use structured::{export_structured, import_structured};
pub use tabular::{TABULAR_HEADER, TabularRow, WORKSHEET_NAME, export_tabular, tabular_rows};

/// The backup payload could not be turned into a field map.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("not a valid JSON backup: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("backup must be a JSON object")]
    NotAnObject,

    #[error("{0}")]
    InvalidValue(CoreError),
}

impl From<CoreError> for ImportError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotAnObject => Self::NotAnObject,
            other => Self::InvalidValue(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("xlsx encoding failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Export file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Xlsx,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xlsx => "xlsx",
        }
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    /// `mala-counter-data-YYYY-MM-DD.<ext>`
    #[must_use]
    pub fn file_name(self, date: NaiveDate) -> String {
        format!("mala-counter-data-{}.{}", date.format("%Y-%m-%d"), self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            other => Err(format!("unknown export format: {other} (expected json or xlsx)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(ExportFormat::Json.file_name(date), "mala-counter-data-2026-03-09.json");
        assert_eq!(ExportFormat::Xlsx.file_name(date), "mala-counter-data-2026-03-09.xlsx");
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert_eq!("excel".parse::<ExportFormat>(), Ok(ExportFormat::Xlsx));
        assert!("csv".parse::<ExportFormat>().is_err());
    }
}
