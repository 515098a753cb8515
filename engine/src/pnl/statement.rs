// Profit & loss statement derived from the transactions table and the scenario rates
use serde::Serialize;
use shared::models::{LineItem, LineKey, ScenarioParams, Transaction, WaterfallPoint};
use tracing::debug;

use super::kpis::Kpis;
use super::waterfall;
use crate::data::table::TransactionTable;
use crate::error::EngineError;

pub const FRIDAY_DISCOUNT_RATE: f64 = 0.02;
pub const COMMISSION_RATE: f64 = 0.05;
pub const COMMISSION_CATEGORY: &str = "Bags";
pub const COMMISSION_BRAND: &str = "Callaway";
pub const COMMISSION_CITIES: [&str; 3] = ["Karachi", "Lahore", "Islamabad"];

/// Every figure of the statement, unsigned the way it is calculated.
/// The presentation signs (deductions negated) are applied in [`PnlTotals::line_items`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PnlTotals {
    pub total_sales: f64,
    pub friday_sales: f64,
    pub friday_discount: f64,
    pub net_sales: f64,
    pub cogs: f64,
    pub gross_profit: f64,
    pub commission_base: f64,
    pub special_commission: f64,
    pub selling_expenses: f64,
    pub admin_expenses: f64,
    pub total_operating_expenses: f64,
    pub profit_before_tax: f64,
    pub tax: f64,
    pub net_profit: f64,
}

impl PnlTotals {
    pub fn from_rows(rows: &[Transaction], params: &ScenarioParams) -> Self {
        let total_sales: f64 = rows.iter().map(Transaction::sales_or_zero).sum();
        let friday_sales: f64 = rows.iter().filter(|t| t.is_friday()).map(Transaction::sales_or_zero).sum();
        let cogs: f64 = rows.iter().map(Transaction::cost_or_zero).sum();
        let commission_base: f64 = rows
            .iter()
            .filter(|t| is_commission_eligible(t))
            .map(Transaction::sales_or_zero)
            .sum();

        let friday_discount = friday_sales * FRIDAY_DISCOUNT_RATE;
        let net_sales = total_sales - friday_discount;
        let gross_profit = net_sales - cogs;

        let special_commission = commission_base * COMMISSION_RATE;
        let selling_expenses = total_sales * params.selling_rate;
        let admin_expenses = gross_profit * params.admin_rate;
        let total_operating_expenses = selling_expenses + special_commission + admin_expenses;
        let profit_before_tax = gross_profit - total_operating_expenses;

        // A loss yields a negative tax (a benefit); kept as plain arithmetic.
        let tax = profit_before_tax * params.tax_rate;
        let net_profit = profit_before_tax - tax;

        PnlTotals {
            total_sales,
            friday_sales,
            friday_discount,
            net_sales,
            cogs,
            gross_profit,
            commission_base,
            special_commission,
            selling_expenses,
            admin_expenses,
            total_operating_expenses,
            profit_before_tax,
            tax,
            net_profit,
        }
    }

    pub fn line_items(&self) -> Vec<LineItem> {
        vec![
            LineItem::amount(LineKey::TotalSales, self.total_sales),
            LineItem::amount(LineKey::FridayDiscount, -self.friday_discount),
            LineItem::amount(LineKey::NetSales, self.net_sales),
            LineItem::amount(LineKey::Cogs, -self.cogs),
            LineItem::amount(LineKey::GrossProfit, self.gross_profit),
            LineItem::header(LineKey::OperatingExpensesHeader),
            LineItem::amount(LineKey::SellingExpenses, -self.selling_expenses),
            LineItem::amount(LineKey::SpecialCommission, -self.special_commission),
            LineItem::amount(LineKey::AdminExpenses, -self.admin_expenses),
            LineItem::amount(LineKey::ProfitBeforeTax, self.profit_before_tax),
            LineItem::amount(LineKey::Tax, -self.tax),
            LineItem::amount(LineKey::NetProfit, self.net_profit),
        ]
    }
}

/// Exact match on all three of category, brand and city. Missing labels never match.
pub fn is_commission_eligible(row: &Transaction) -> bool {
    row.category.as_deref() == Some(COMMISSION_CATEGORY)
        && row.brand.as_deref() == Some(COMMISSION_BRAND)
        && row.city.as_deref().is_some_and(|city| COMMISSION_CITIES.contains(&city))
}

#[derive(Debug, Clone)]
pub struct PnlResult {
    pub params: ScenarioParams,
    pub totals: PnlTotals,
    pub lines: Vec<LineItem>,
    pub kpis: Kpis,
}

impl PnlResult {
    pub fn line(&self, key: LineKey) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.key == key)
    }

    pub fn waterfall(&self) -> Vec<WaterfallPoint> {
        waterfall::select(&self.lines)
    }
}

/// Pure function of the table and the rates; call it again whenever a rate changes.
pub fn compute(table: &TransactionTable, params: ScenarioParams) -> PnlResult {
    compute_rows(table.rows(), params)
}

/// Same as [`compute`] but rejects rates outside their allowed ranges first.
pub fn try_compute(table: &TransactionTable, params: ScenarioParams) -> Result<PnlResult, EngineError> {
    params.validate().map_err(|(name, value, bounds)| EngineError::ParameterOutOfRange {
        name: name.to_string(),
        value,
        min: bounds.min,
        max: bounds.max,
    })?;
    Ok(compute(table, params))
}

pub fn compute_rows(rows: &[Transaction], params: ScenarioParams) -> PnlResult {
    let totals = PnlTotals::from_rows(rows, &params);
    let kpis = Kpis::new(totals.net_sales, totals.gross_profit, totals.profit_before_tax, totals.net_profit);
    debug!(
        rows = rows.len(),
        net_sales = totals.net_sales,
        profit_before_tax = totals.profit_before_tax,
        net_profit = totals.net_profit,
        "Computed P&L statement"
    );
    PnlResult {
        params,
        lines: totals.line_items(),
        totals,
        kpis,
    }
}
