// In-process client for the P&L engine. Holds the table cache so a parameter change
// only reruns the calculation, never the file load.

use engine::data::{TableCache, TransactionTable};
use engine::pnl::{self, PnlResult};
use engine::{EngineError, LoadError, LoaderSettings};
use shared::models::ScenarioParams;
use std::path::Path;
use std::sync::Arc;

pub struct EngineClient {
    cache: TableCache,
}

impl EngineClient {
    pub fn new(settings: LoaderSettings) -> Result<Self, EngineError> {
        Ok(Self { cache: TableCache::new(settings)? })
    }

    pub fn load_table(&mut self, path: &Path) -> Result<Arc<TransactionTable>, LoadError> {
        self.cache.load(path)
    }

    pub fn compute(&mut self, path: &Path, params: ScenarioParams) -> Result<PnlResult, EngineError> {
        let table = self.cache.load(path)?;
        pnl::try_compute(&table, params)
    }

    pub fn cached_tables(&self) -> usize {
        self.cache.len()
    }
}
