// Profit & Loss statement table
use shared::models::{LineItem, LineKey};
use shared::utils::format_currency;
use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Alignment, Format, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::theme::{ThemePalette, Tone};

const DETAIL_PREFIX: &str = "   - ";
const VALUE_HEADER: &str = "Value";

#[derive(Debug, Tabled)]
struct StatementRow {
    #[tabled(rename = "Metric")]
    metric: String,
    // Header rows have no amount and show a blank cell.
    #[tabled(rename = "Value", display_with = "display_amount")]
    amount: Option<f64>,
}

fn display_amount(amount: &Option<f64>) -> String {
    amount.map(format_currency).unwrap_or_default()
}

impl From<&LineItem> for StatementRow {
    fn from(line: &LineItem) -> Self {
        let metric = if line.key.is_detail() {
            format!("{}{}", DETAIL_PREFIX, line.label)
        } else {
            line.label.clone()
        };
        Self { metric, amount: line.amount }
    }
}

/// Two columns: metric and value. Totals are emphasized and deductions colored when the
/// palette allows it.
pub fn render(lines: &[LineItem], currency: &str, palette: &ThemePalette) -> String {
    let value_header = format!("{} ({})", VALUE_HEADER, currency);
    let mut table = Table::new(lines.iter().map(StatementRow::from));
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()))
        .with(Modify::new(Rows::first()).with(Format::content(move |text| {
            if text == VALUE_HEADER {
                value_header.clone()
            } else {
                text.to_string()
            }
        })));

    if let Some(color) = palette.color(Tone::Muted) {
        table.with(Modify::new(Rows::first()).with(color));
    }
    for (index, line) in lines.iter().enumerate() {
        let tone = if line.key.is_total() {
            Tone::Emphasis
        } else if line.amount.is_some_and(|v| v < 0.0) {
            Tone::Negative
        } else {
            continue;
        };
        if let Some(color) = palette.color(tone) {
            // Row 0 is the column header.
            table.with(Modify::new(Rows::single(index + 1)).with(color));
        }
    }

    let mut out = table.to_string();
    out.push('\n');
    out
}

// Row lookup used by callers that need a single figure, e.g. the headline.
pub fn amount_of(lines: &[LineItem], key: LineKey) -> Option<f64> {
    lines.iter().find(|line| line.key == key).and_then(|line| line.amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<LineItem> {
        vec![
            LineItem::amount(LineKey::TotalSales, 1500.0),
            LineItem::amount(LineKey::NetSales, 1480.0),
            LineItem::header(LineKey::OperatingExpensesHeader),
            LineItem::amount(LineKey::SellingExpenses, -75.0),
            LineItem::amount(LineKey::NetProfit, 233.4),
        ]
    }

    fn row<'a>(out: &'a str, label: &str) -> &'a str {
        out.lines().find(|l| l.contains(label)).unwrap()
    }

    #[test]
    fn test_plain_table_layout() {
        let out = render(&lines(), "PKR", &ThemePalette::plain());
        let rows: Vec<&str> = out.lines().collect();
        assert!(rows[0].contains("Metric"));
        assert!(rows[0].contains("Value (PKR)"));
        assert!(rows[2].contains("Total Sales"));
        assert!(rows[2].trim_end().ends_with("1,500"));
        // Header row has a blank amount.
        let header = row(&out, "Less: Operating Expenses");
        assert!(header.trim_end().ends_with('|'));
        assert!(row(&out, "Selling Expenses").contains("   - Selling Expenses"));
        assert!(row(&out, "Selling Expenses").trim_end().ends_with("-75"));
        assert!(row(&out, "Net Profit").trim_end().ends_with("233"));
        // Every row shares the same width.
        assert_eq!(rows[2].chars().count(), row(&out, "Net Profit").chars().count());
    }

    #[test]
    fn test_currency_in_value_header() {
        let out = render(&lines(), "USD", &ThemePalette::plain());
        assert!(out.lines().next().unwrap().contains("Value (USD)"));
    }

    #[test]
    fn test_totals_emphasized_with_color() {
        let out = render(&lines(), "PKR", &ThemePalette::ansi());
        assert!(row(&out, "Net Sales").contains("\u{1b}[1m"));
        assert!(row(&out, "Selling Expenses").contains("\u{1b}[31m"));
        assert!(!row(&out, "Total Sales").contains("\u{1b}[31m"));
    }

    #[test]
    fn test_plain_table_has_no_escape_codes() {
        let out = render(&lines(), "PKR", &ThemePalette::plain());
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_amount_of() {
        assert_eq!(amount_of(&lines(), LineKey::NetSales), Some(1480.0));
        assert_eq!(amount_of(&lines(), LineKey::OperatingExpensesHeader), None);
        assert_eq!(amount_of(&lines(), LineKey::Tax), None);
    }
}
