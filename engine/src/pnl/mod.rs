// P&L calculation: statement lines, margin KPIs and the waterfall selection
pub mod kpis;
pub mod statement;
pub mod waterfall;

pub use kpis::{Kpis, KpiValue};
pub use statement::{compute, compute_rows, try_compute, PnlResult, PnlTotals};
