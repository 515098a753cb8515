// Profitability KPI cards
use engine::pnl::{KpiValue, Kpis};
use serde_json::{json, Value};
use shared::utils::format_percent;
use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::theme::{ThemePalette, Tone};

const UNDEFINED: &str = "n/a";

#[derive(Debug, Tabled)]
struct KpiCard {
    #[tabled(rename = "KPI")]
    name: &'static str,
    #[tabled(rename = "Value")]
    shown: String,
}

fn display_value(value: &KpiValue) -> String {
    match value {
        Ok(ratio) => format_percent(*ratio),
        Err(err) => format!("{} ({})", UNDEFINED, err),
    }
}

fn tone_of(value: &KpiValue) -> Tone {
    match value {
        Ok(ratio) if *ratio < 0.0 => Tone::Negative,
        Ok(_) => Tone::Emphasis,
        Err(_) => Tone::Muted,
    }
}

pub fn render(kpis: &Kpis, palette: &ThemePalette) -> String {
    let named = kpis.named();
    let mut table = Table::new(named.iter().map(|(name, value)| KpiCard { name: *name, shown: display_value(value) }));
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()));
    for (index, (_, value)) in named.iter().enumerate() {
        if let Some(color) = palette.color(tone_of(value)) {
            table.with(Modify::new(Rows::single(index + 1)).with(color));
        }
    }

    let mut out = table.to_string();
    out.push('\n');
    out
}

/// Each KPI as `{ "value": ratio|null, "display": "39.2%" }`, plus `"error"` when undefined.
pub fn to_json(kpis: &Kpis) -> Value {
    let card = |value: &KpiValue| match value {
        Ok(ratio) => json!({ "value": ratio, "display": format_percent(*ratio) }),
        Err(err) => json!({ "value": Value::Null, "display": UNDEFINED, "error": err.to_string() }),
    };
    json!({
        "gross_profit_margin": card(&kpis.gross_profit_margin),
        "operating_margin": card(&kpis.operating_margin),
        "net_profit_margin": card(&kpis.net_profit_margin),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defined_margins() {
        let kpis = Kpis::new(1480.0, 580.0, 389.0, 233.4);
        let out = render(&kpis, &ThemePalette::plain());
        let rows: Vec<&str> = out.lines().map(str::trim_end).collect();
        // Column header, rule, then one card per KPI.
        assert_eq!(rows.len(), 5);
        assert!(rows[0].contains("KPI"));
        assert!(rows[2].contains("Gross Profit Margin"));
        assert!(rows[2].ends_with("39.2%"));
        assert!(rows[3].ends_with("26.3%"));
        assert!(rows[4].ends_with("15.8%"));
    }

    #[test]
    fn test_render_undefined_margins() {
        let kpis = Kpis::new(0.0, 0.0, 0.0, 0.0);
        let out = render(&kpis, &ThemePalette::plain());
        assert_eq!(out.matches("n/a (undefined: net sales is zero)").count(), 3);
    }

    #[test]
    fn test_negative_margin_colored() {
        let kpis = Kpis::new(1000.0, 200.0, -50.0, -30.0);
        let out = render(&kpis, &ThemePalette::ansi());
        let net = out.lines().find(|l| l.contains("Net Profit Margin")).unwrap();
        assert!(net.contains("\u{1b}[31m"));
        let gross = out.lines().find(|l| l.contains("Gross Profit Margin")).unwrap();
        assert!(gross.contains("\u{1b}[1m"));
    }

    #[test]
    fn test_json_marks_undefined() {
        let defined = to_json(&Kpis::new(1480.0, 580.0, 389.0, 233.4));
        assert_eq!(defined["operating_margin"]["display"], "26.3%");
        let undefined = to_json(&Kpis::new(0.0, 1.0, 1.0, 1.0));
        assert!(undefined["net_profit_margin"]["value"].is_null());
        assert_eq!(undefined["net_profit_margin"]["error"], "undefined: net sales is zero");
    }
}
