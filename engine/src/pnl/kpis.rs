// Profitability ratios over net sales
use crate::error::ComputationError;

pub type KpiValue = Result<f64, ComputationError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kpis {
    pub gross_profit_margin: KpiValue,
    pub operating_margin: KpiValue,
    pub net_profit_margin: KpiValue,
}

impl Kpis {
    pub fn new(net_sales: f64, gross_profit: f64, profit_before_tax: f64, net_profit: f64) -> Self {
        Self {
            gross_profit_margin: margin(gross_profit, net_sales),
            operating_margin: margin(profit_before_tax, net_sales),
            net_profit_margin: margin(net_profit, net_sales),
        }
    }

    /// Display order: gross, operating, net.
    pub fn named(&self) -> [(&'static str, KpiValue); 3] {
        [
            ("Gross Profit Margin", self.gross_profit_margin),
            ("Operating Margin", self.operating_margin),
            ("Net Profit Margin", self.net_profit_margin),
        ]
    }

    pub fn all_defined(&self) -> bool {
        self.named().iter().all(|(_, value)| value.is_ok())
    }
}

pub fn margin(numerator: f64, net_sales: f64) -> KpiValue {
    if net_sales == 0.0 {
        return Err(ComputationError::ZeroNetSales);
    }
    let ratio = numerator / net_sales;
    if ratio.is_finite() {
        Ok(ratio)
    } else {
        Err(ComputationError::NonFinite)
    }
}
