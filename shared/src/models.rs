use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// Weekday index, Monday = 0. Fixed regardless of locale.
pub const FRIDAY: u8 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub order_date: NaiveDate,
    pub weekday: u8,
    // Empty numeric cells are kept as None and contribute nothing to sums.
    pub sales: Option<f64>,
    pub cost: Option<f64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub city: Option<String>,
}

impl Transaction {
    pub fn new(
        order_date: NaiveDate,
        sales: Option<f64>,
        cost: Option<f64>,
        category: Option<&str>,
        brand: Option<&str>,
        city: Option<&str>,
    ) -> Self {
        Self {
            order_date,
            weekday: order_date.weekday().num_days_from_monday() as u8,
            sales,
            cost,
            category: normalize_label(category),
            brand: normalize_label(brand),
            city: normalize_label(city),
        }
    }

    pub fn is_friday(&self) -> bool {
        self.weekday == FRIDAY
    }

    pub fn sales_or_zero(&self) -> f64 {
        self.sales.unwrap_or(0.0)
    }

    pub fn cost_or_zero(&self) -> f64 {
        self.cost.unwrap_or(0.0)
    }
}

// Trimmed, and blank cells become None.
fn normalize_label(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Allowed range for one scenario rate, all values as fractions (0.05 = 5%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

pub const SELLING_RATE_BOUNDS: RateBounds = RateBounds { min: 0.04, max: 0.08, step: 0.005, default: 0.05 };
pub const ADMIN_RATE_BOUNDS: RateBounds = RateBounds { min: 0.15, max: 0.25, step: 0.005, default: 0.20 };
pub const TAX_RATE_BOUNDS: RateBounds = RateBounds { min: 0.30, max: 0.50, step: 0.005, default: 0.40 };

// Slack for values that went through a percent -> fraction conversion.
const BOUNDS_EPSILON: f64 = 1e-9;

impl RateBounds {
    pub fn contains(&self, rate: f64) -> bool {
        rate.is_finite() && rate >= self.min - BOUNDS_EPSILON && rate <= self.max + BOUNDS_EPSILON
    }

    pub fn clamp(&self, rate: f64) -> f64 {
        rate.clamp(self.min, self.max)
    }

    /// Clamps into range, then rounds to the nearest step counted from `min`.
    pub fn snap(&self, rate: f64) -> f64 {
        let clamped = self.clamp(rate);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub selling_rate: f64,
    pub admin_rate: f64,
    pub tax_rate: f64,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            selling_rate: SELLING_RATE_BOUNDS.default,
            admin_rate: ADMIN_RATE_BOUNDS.default,
            tax_rate: TAX_RATE_BOUNDS.default,
        }
    }
}

impl ScenarioParams {
    pub fn new(selling_rate: f64, admin_rate: f64, tax_rate: f64) -> Self {
        Self { selling_rate, admin_rate, tax_rate }
    }

    /// Returns the name, value and bounds of the first rate outside its range.
    pub fn validate(&self) -> Result<(), (&'static str, f64, RateBounds)> {
        let checks = [
            ("selling_rate", self.selling_rate, SELLING_RATE_BOUNDS),
            ("admin_rate", self.admin_rate, ADMIN_RATE_BOUNDS),
            ("tax_rate", self.tax_rate, TAX_RATE_BOUNDS),
        ];
        for (name, value, bounds) in checks {
            if !bounds.contains(value) {
                return Err((name, value, bounds));
            }
        }
        Ok(())
    }
}

// Semantic identity of each statement row. Consumers select rows by key, never by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKey {
    TotalSales,
    FridayDiscount,
    NetSales,
    Cogs,
    GrossProfit,
    OperatingExpensesHeader,
    SellingExpenses,
    SpecialCommission,
    AdminExpenses,
    ProfitBeforeTax,
    Tax,
    NetProfit,
}

impl LineKey {
    pub fn label(self) -> &'static str {
        match self {
            LineKey::TotalSales => "Total Sales",
            LineKey::FridayDiscount => "Less: Friday Discount (2%)",
            LineKey::NetSales => "Net Sales",
            LineKey::Cogs => "Less: Cost of Goods Sold (COGS)",
            LineKey::GrossProfit => "Gross Profit",
            LineKey::OperatingExpensesHeader => "Less: Operating Expenses",
            LineKey::SellingExpenses => "Selling Expenses",
            LineKey::SpecialCommission => "Special Commissions",
            LineKey::AdminExpenses => "Admin Expenses",
            LineKey::ProfitBeforeTax => "Profit Before Tax",
            LineKey::Tax => "Less: Taxation",
            LineKey::NetProfit => "Net Profit (After Tax)",
        }
    }

    /// Subtotal rows, emphasized when rendered.
    pub fn is_total(self) -> bool {
        matches!(
            self,
            LineKey::NetSales | LineKey::GrossProfit | LineKey::ProfitBeforeTax | LineKey::NetProfit
        )
    }

    /// Operating expense components listed under the header row.
    pub fn is_detail(self) -> bool {
        matches!(
            self,
            LineKey::SellingExpenses | LineKey::SpecialCommission | LineKey::AdminExpenses
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub key: LineKey,
    pub label: String,
    // None only for section headers.
    pub amount: Option<f64>,
}

impl LineItem {
    pub fn amount(key: LineKey, amount: f64) -> Self {
        Self { key, label: key.label().to_string(), amount: Some(amount) }
    }

    pub fn header(key: LineKey) -> Self {
        Self { key, label: key.label().to_string(), amount: None }
    }

    pub fn is_header(&self) -> bool {
        self.amount.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallPoint {
    pub key: LineKey,
    pub label: String,
    pub value: f64,
}
