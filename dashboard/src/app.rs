// Dashboard root: lays the sections out in order, for text or JSON output.
use engine::data::TransactionTable;
use engine::pnl::PnlResult;
use engine::LoadError;
use serde_json::{json, Value};
use shared::models::LineKey;
use shared::utils::format_currency;

use crate::components::{chart::waterfall, kpi_cards, pnl_table, scenario_panel};
use crate::config::theme::{ThemePalette, Tone};
use crate::config::AppConfig;
use crate::state::app_state::AppState;

pub struct App<'a> {
    config: &'a AppConfig,
    palette: ThemePalette,
}

impl<'a> App<'a> {
    pub fn new(config: &'a AppConfig, palette: ThemePalette) -> Self {
        Self { config, palette }
    }

    fn heading(&self, text: &str) -> String {
        format!("\n{}\n", self.palette.paint(Tone::Heading, text))
    }

    pub fn render_text(&self, state: &AppState, table: &TransactionTable, result: &PnlResult) -> String {
        let mut out = String::new();
        out.push_str(&self.palette.paint(Tone::Heading, &self.config.app.title));
        out.push('\n');
        out.push_str(&self.palette.paint(
            Tone::Muted,
            &format!("{} transactions from {}", table.len(), table.source().display()),
        ));
        out.push('\n');
        if let Some(net_profit) = pnl_table::amount_of(&result.lines, LineKey::NetProfit) {
            out.push_str(&format!(
                "Net profit after tax: {} {}\n",
                self.config.app.currency,
                format_currency(net_profit)
            ));
        }

        out.push_str(&self.heading("Scenario Manager"));
        out.push_str(&scenario_panel::render(state, &self.palette));

        out.push_str(&self.heading("Profit & Loss Statement"));
        out.push_str(&pnl_table::render(&result.lines, &self.config.app.currency, &self.palette));

        out.push_str(&self.heading("Profitability KPIs"));
        out.push_str(&kpi_cards::render(&result.kpis, &self.palette));

        out.push_str(&self.heading("Profit Waterfall"));
        out.push_str(&waterfall::render(&result.waterfall(), &self.config.chart, &self.palette));
        out
    }

    pub fn render_json(&self, table: &TransactionTable, result: &PnlResult) -> Value {
        json!({
            "title": self.config.app.title,
            "currency": self.config.app.currency,
            "source": table.source().display().to_string(),
            "rows": table.len(),
            "data_quality": table.quality(),
            "params": result.params,
            "lines": result.lines,
            "totals": result.totals,
            "kpis": kpi_cards::to_json(&result.kpis),
            "waterfall": result.waterfall(),
        })
    }

    // Shown instead of the report: nothing is computed from a file that failed to load.
    pub fn render_load_error(&self, err: &LoadError) -> String {
        format!(
            "{}\n{}\n{}\n",
            self.palette.paint(Tone::Negative, &format!("Error: {}", err)),
            err.hint(),
            self.palette.paint(
                Tone::Muted,
                "Data file not loaded. The P&L was not computed; fix the input file and run again."
            )
        )
    }
}
