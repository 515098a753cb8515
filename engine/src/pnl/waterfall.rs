// Subtotal points for the profit waterfall chart
use shared::models::{LineItem, LineKey, WaterfallPoint};

pub const WATERFALL_KEYS: [LineKey; 4] = [
    LineKey::NetSales,
    LineKey::GrossProfit,
    LineKey::ProfitBeforeTax,
    LineKey::NetProfit,
];

/// Picks the waterfall rows by key, so header rows may be added or moved freely.
/// Rows that are absent or carry no amount are skipped.
pub fn select(lines: &[LineItem]) -> Vec<WaterfallPoint> {
    WATERFALL_KEYS
        .iter()
        .filter_map(|key| {
            let line = lines.iter().find(|line| line.key == *key)?;
            line.amount.map(|value| WaterfallPoint {
                key: *key,
                label: line.label.clone(),
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<LineItem> {
        vec![
            LineItem::amount(LineKey::TotalSales, 1500.0),
            LineItem::amount(LineKey::FridayDiscount, -20.0),
            LineItem::amount(LineKey::NetSales, 1480.0),
            LineItem::amount(LineKey::Cogs, -900.0),
            LineItem::amount(LineKey::GrossProfit, 580.0),
            LineItem::header(LineKey::OperatingExpensesHeader),
            LineItem::amount(LineKey::SellingExpenses, -75.0),
            LineItem::amount(LineKey::SpecialCommission, 0.0),
            LineItem::amount(LineKey::AdminExpenses, -116.0),
            LineItem::amount(LineKey::ProfitBeforeTax, 389.0),
            LineItem::amount(LineKey::Tax, -155.6),
            LineItem::amount(LineKey::NetProfit, 233.4),
        ]
    }

    fn values(points: &[WaterfallPoint]) -> Vec<(LineKey, f64)> {
        points.iter().map(|p| (p.key, p.value)).collect()
    }

    #[test]
    fn test_selects_the_four_subtotals() {
        let points = select(&lines());
        assert_eq!(
            values(&points),
            vec![
                (LineKey::NetSales, 1480.0),
                (LineKey::GrossProfit, 580.0),
                (LineKey::ProfitBeforeTax, 389.0),
                (LineKey::NetProfit, 233.4),
            ]
        );
        assert_eq!(points[3].label, "Net Profit (After Tax)");
    }

    #[test]
    fn test_selection_survives_reordered_and_extra_headers() {
        let mut shuffled = lines();
        shuffled.insert(0, LineItem::header(LineKey::OperatingExpensesHeader));
        shuffled.reverse();
        shuffled.insert(3, LineItem::header(LineKey::OperatingExpensesHeader));
        assert_eq!(values(&select(&shuffled)), values(&select(&lines())));
    }

    #[test]
    fn test_missing_rows_are_skipped() {
        let partial: Vec<LineItem> = lines().into_iter().filter(|l| l.key != LineKey::GrossProfit).collect();
        let points = select(&partial);
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.key != LineKey::GrossProfit));
    }
}
