// Loading and caching of the transactions file
pub mod cache;
pub mod csv_parser;
pub mod table;

pub use cache::TableCache;
pub use csv_parser::SalesCsvParser;
pub use table::{DataQuality, TransactionTable};
