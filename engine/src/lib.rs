// Engine library root: loads the sales transactions and derives the P&L statement.

pub mod config;
pub mod data;
pub mod error;
pub mod pnl;

pub use config::LoaderSettings;
pub use data::{TableCache, TransactionTable};
pub use error::{ComputationError, EngineError, LoadError};
pub use pnl::{compute, PnlResult};
