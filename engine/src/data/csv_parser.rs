use csv::{ReaderBuilder, StringRecord};
use shared::models::Transaction;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use crate::config::LoaderSettings;
use crate::data::table::TransactionTable;
use crate::error::{EngineError, LoadError};

// Cells that read as missing, following the usual spreadsheet/pandas spellings.
const MISSING_TOKENS: [&str; 9] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A"];

pub fn is_missing(raw: &str) -> bool {
    MISSING_TOKENS.contains(&raw.trim())
}

// Amounts such as "1,234" or "12,500.75".
pub mod number_format {
    use std::str::FromStr;

    /// Strips thousands separators and parses. Missing cells come back as `Ok(None)`.
    pub fn parse_amount(raw: &str, thousands_separator: char) -> Result<Option<f64>, String> {
        if super::is_missing(raw) {
            return Ok(None);
        }
        let normalized: String = raw.trim().chars().filter(|c| *c != thousands_separator).collect();
        let value = f64::from_str(&normalized)
            .map_err(|e| format!("failed to parse amount '{}': {}", raw, e))?;
        if !value.is_finite() {
            return Err(format!("amount '{}' is not a finite number", raw));
        }
        Ok(Some(value))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_amount_simple() {
            assert_eq!(parse_amount("123.45", ',').unwrap(), Some(123.45));
        }

        #[test]
        fn test_parse_amount_with_thousands() {
            assert_eq!(parse_amount("1,234", ',').unwrap(), Some(1234.0));
            assert_eq!(parse_amount(" 1,234,567.5 ", ',').unwrap(), Some(1234567.5));
        }

        #[test]
        fn test_parse_amount_missing() {
            assert_eq!(parse_amount("", ',').unwrap(), None);
            assert_eq!(parse_amount("  ", ',').unwrap(), None);
            assert_eq!(parse_amount("NaN", ',').unwrap(), None);
        }

        #[test]
        fn test_parse_amount_invalid() {
            assert!(parse_amount("12a", ',').is_err());
            assert!(parse_amount("inf", ',').is_err());
        }
    }
}

// Order dates like "12-Sep-24", with the export's "Sept" spelling repaired.
pub mod date_format {
    use chrono::NaiveDate;
    use std::borrow::Cow;

    /// Rewrites a month token of exactly "Sept" to "Sep". Any other input is returned untouched.
    pub fn repair_month_token(raw: &str) -> Cow<'_, str> {
        let mut parts = raw.splitn(3, '-');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(day), Some("Sept"), Some(year)) => Cow::Owned(format!("{}-Sep-{}", day, year)),
            _ => Cow::Borrowed(raw),
        }
    }

    pub fn parse_order_date(raw: &str, format: &str) -> Result<NaiveDate, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("empty date".to_string());
        }
        let repaired = repair_month_token(trimmed);
        NaiveDate::parse_from_str(&repaired, format).map_err(|e| e.to_string())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::Datelike;

        const FORMAT: &str = "%d-%b-%y";

        #[test]
        fn test_repair_rewrites_sept_only() {
            assert_eq!(repair_month_token("12-Sept-24"), "12-Sep-24");
            assert!(matches!(repair_month_token("12-Sep-24"), Cow::Borrowed(_)));
            assert_eq!(repair_month_token("12-Oct-24"), "12-Oct-24");
            assert_eq!(repair_month_token("12-September-24"), "12-September-24");
        }

        #[test]
        fn test_repair_is_idempotent() {
            for raw in ["12-Sept-24", "12-Sep-24", "1-Jan-23", "garbage"] {
                let once = repair_month_token(raw).into_owned();
                let twice = repair_month_token(&once).into_owned();
                assert_eq!(once, twice);
            }
        }

        #[test]
        fn test_parse_order_date_valid() {
            let date = parse_order_date("12-Sep-24", FORMAT).unwrap();
            assert_eq!((date.year(), date.month(), date.day()), (2024, 9, 12));
        }

        #[test]
        fn test_parse_order_date_repairs_sept() {
            let date = parse_order_date(" 3-Sept-24 ", FORMAT).unwrap();
            assert_eq!((date.year(), date.month(), date.day()), (2024, 9, 3));
        }

        #[test]
        fn test_repair_does_not_mask_other_malformed_dates() {
            for raw in ["12-Septe-24", "32-Sep-24", "12-Foo-24", "2024-09-12", "12/Sep/24", "", "Sept"] {
                assert!(parse_order_date(raw, FORMAT).is_err(), "'{}' should not parse", raw);
            }
        }
    }
}

// Column positions resolved once from the header row.
struct ColumnIndex {
    order_date: usize,
    sales: usize,
    cost: usize,
    category: usize,
    brand: usize,
    city: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, settings: &LoaderSettings, path: &Path) -> Result<Self, LoadError> {
        let find = |name: &str| -> Result<usize, LoadError> {
            headers
                .iter()
                .position(|header| header.trim_start_matches('\u{feff}').trim() == name)
                .ok_or_else(|| LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })
        };
        let columns = &settings.columns;
        Ok(ColumnIndex {
            order_date: find(columns.order_date.as_str())?,
            sales: find(columns.sales.as_str())?,
            cost: find(columns.cost.as_str())?,
            category: find(columns.category.as_str())?,
            brand: find(columns.brand.as_str())?,
            city: find(columns.city.as_str())?,
        })
    }
}

pub struct SalesCsvParser {
    settings: LoaderSettings,
    delimiter: u8,
}

impl SalesCsvParser {
    pub fn new(settings: LoaderSettings) -> Result<Self, EngineError> {
        settings.validate()?;
        let delimiter = settings
            .delimiter_byte()
            .ok_or_else(|| EngineError::ConfigError(format!("invalid delimiter '{}'", settings.delimiter)))?;
        Ok(Self { settings, delimiter })
    }

    // Header: Order Date,Sales,Cost,Product Category,Brand,City (any order, extra columns ignored)
    // Example row: 13-Sept-24,"1,250",800,Bags,Callaway,Karachi
    pub fn load_transactions(&self, path: &Path) -> Result<Vec<Transaction>, LoadError> {
        let file = File::open(path).map_err(|e| open_error(path, e))?;
        let metadata = file.metadata().map_err(|e| open_error(path, e))?;
        if !metadata.is_file() {
            return Err(LoadError::Unreadable {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers = rdr.headers().map_err(|e| csv_error(path, e))?.clone();
        let columns = ColumnIndex::resolve(&headers, &self.settings, path)?;

        let mut transactions = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| csv_error(path, e))?;
            transactions.push(self.parse_record(&record, &columns)?);
        }
        Ok(transactions)
    }

    /// Loads and wraps the rows with their data-quality summary.
    pub fn load_table(&self, path: &Path) -> Result<TransactionTable, LoadError> {
        let rows = self.load_transactions(path)?;
        Ok(TransactionTable::new(path.to_path_buf(), rows))
    }

    fn parse_record(&self, record: &StringRecord, columns: &ColumnIndex) -> Result<Transaction, LoadError> {
        let line = record.position().map_or(0, |p| p.line());
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let date_raw = field(columns.order_date);
        let order_date = date_format::parse_order_date(date_raw, &self.settings.date_format).map_err(|reason| {
            LoadError::UnparseableDate { line, value: date_raw.to_string(), reason }
        })?;

        let sales = self.parse_amount_field(field(columns.sales), &self.settings.columns.sales, line)?;
        let cost = self.parse_amount_field(field(columns.cost), &self.settings.columns.cost, line)?;

        let label = |idx: usize| Some(field(idx)).filter(|raw| !is_missing(raw));
        Ok(Transaction::new(
            order_date,
            sales,
            cost,
            label(columns.category),
            label(columns.brand),
            label(columns.city),
        ))
    }

    fn parse_amount_field(&self, raw: &str, column: &str, line: u64) -> Result<Option<f64>, LoadError> {
        number_format::parse_amount(raw, self.settings.thousands_separator).map_err(|_| LoadError::InvalidNumber {
            line,
            column: column.to_string(),
            value: raw.to_string(),
        })
    }
}

fn open_error(path: &Path, err: io::Error) -> LoadError {
    if err.kind() == io::ErrorKind::NotFound {
        LoadError::FileNotFound { path: path.to_path_buf() }
    } else {
        LoadError::Unreadable { path: path.to_path_buf(), source: err }
    }
}

// Read failures surfacing through the csv reader are still file errors, not format errors.
fn csv_error(path: &Path, err: csv::Error) -> LoadError {
    if let csv::ErrorKind::Io(io_err) = err.kind() {
        return LoadError::Unreadable {
            path: path.to_path_buf(),
            source: io::Error::new(io_err.kind(), io_err.to_string()),
        };
    }
    LoadError::Csv { path: path.to_path_buf(), source: err }
}
