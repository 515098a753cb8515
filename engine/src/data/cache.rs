// Memoizes loaded tables by file identity. Entries are never invalidated within a run.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::LoaderSettings;
use crate::data::csv_parser::SalesCsvParser;
use crate::data::table::TransactionTable;
use crate::error::{EngineError, LoadError};

pub struct TableCache {
    parser: SalesCsvParser,
    // Keyed by canonical path when the file could be resolved, else by the literal path.
    tables: HashMap<PathBuf, Arc<TransactionTable>>,
    // Literal path as requested -> key in `tables`.
    aliases: HashMap<PathBuf, PathBuf>,
}

impl TableCache {
    pub fn new(settings: LoaderSettings) -> Result<Self, EngineError> {
        Ok(Self {
            parser: SalesCsvParser::new(settings)?,
            tables: HashMap::new(),
            aliases: HashMap::new(),
        })
    }

    /// Returns the cached table for `path`, reading and parsing the file only on the first request.
    /// Failed loads are not remembered.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Arc<TransactionTable>, LoadError> {
        let path = path.as_ref();
        if let Some(table) = self.lookup(path) {
            debug!(path = %path.display(), rows = table.len(), "Transactions table served from cache");
            return Ok(table);
        }

        let table = Arc::new(self.parser.load_table(path)?);
        info!(path = %path.display(), rows = table.len(), "Loaded transactions table");

        let quality = table.quality();
        if quality.has_issues() {
            warn!(
                missing_sales = quality.missing_sales,
                missing_cost = quality.missing_cost,
                missing_category = quality.missing_category,
                missing_brand = quality.missing_brand,
                missing_city = quality.missing_city,
                "Rows with missing values were kept: empty amounts count as zero and empty labels match no filter"
            );
        }

        let key = identity(path);
        self.aliases.insert(path.to_path_buf(), key.clone());
        self.tables.insert(key, Arc::clone(&table));
        Ok(table)
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.lookup(path.as_ref()).is_some()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    fn lookup(&self, path: &Path) -> Option<Arc<TransactionTable>> {
        self.aliases
            .get(path)
            .and_then(|key| self.tables.get(key))
            .or_else(|| self.tables.get(&identity(path)))
            .cloned()
    }
}

fn identity(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    fn cache() -> TableCache {
        TableCache::new(LoaderSettings::default()).unwrap()
    }

    #[test]
    fn test_second_load_does_not_touch_the_file() {
        let tmp_file = create_test_csv("Order Date,Sales,Cost,Product Category,Brand,City\n1-Jan-24,10,5,Bags,Callaway,Karachi");
        let path = tmp_file.path().to_path_buf();
        let mut cache = cache();

        let first = cache.load(&path).unwrap();
        // Removing the file proves the second call never re-reads it.
        tmp_file.close().unwrap();
        let second = cache.load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&path));
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let mut cache = cache();
        let err = cache.load("missing/data.csv").unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
        assert!(cache.is_empty());
        assert!(!cache.contains("missing/data.csv"));
    }

    #[test]
    fn test_distinct_files_are_cached_separately() {
        let a = create_test_csv("Order Date,Sales,Cost,Product Category,Brand,City\n1-Jan-24,10,5,Bags,Callaway,Karachi");
        let b = create_test_csv("Order Date,Sales,Cost,Product Category,Brand,City\n2-Jan-24,20,5,Bags,Callaway,Lahore");
        let mut cache = cache();
        let table_a = cache.load(a.path()).unwrap();
        let table_b = cache.load(b.path()).unwrap();
        assert!(!Arc::ptr_eq(&table_a, &table_b));
        assert_eq!(cache.len(), 2);
    }
}
