// The normalized, read-only table of transactions produced by one load.
use serde::Serialize;
use shared::models::Transaction;
use std::path::{Path, PathBuf};

/// Counts of cells that were blank or unreadable as missing. Such rows stay in the
/// table: empty amounts sum as zero and empty labels never match a filter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataQuality {
    pub total_rows: usize,
    pub missing_sales: usize,
    pub missing_cost: usize,
    pub missing_category: usize,
    pub missing_brand: usize,
    pub missing_city: usize,
}

impl DataQuality {
    pub fn from_rows(rows: &[Transaction]) -> Self {
        rows.iter().fold(
            DataQuality { total_rows: rows.len(), ..Default::default() },
            |mut acc, row| {
                acc.missing_sales += row.sales.is_none() as usize;
                acc.missing_cost += row.cost.is_none() as usize;
                acc.missing_category += row.category.is_none() as usize;
                acc.missing_brand += row.brand.is_none() as usize;
                acc.missing_city += row.city.is_none() as usize;
                acc
            },
        )
    }

    pub fn has_issues(&self) -> bool {
        self.missing_sales + self.missing_cost + self.missing_category + self.missing_brand + self.missing_city > 0
    }
}

#[derive(Debug, Clone)]
pub struct TransactionTable {
    source: PathBuf,
    rows: Vec<Transaction>,
    quality: DataQuality,
}

impl TransactionTable {
    pub fn new(source: PathBuf, rows: Vec<Transaction>) -> Self {
        let quality = DataQuality::from_rows(&rows);
        Self { source, rows, quality }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn quality(&self) -> DataQuality {
        self.quality
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
