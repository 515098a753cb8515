// Scenario manager: the current value of each rate with its slider range
use crate::config::theme::{ThemePalette, Tone};
use crate::state::app_state::{AppState, RateKind};

pub fn render(state: &AppState, palette: &ThemePalette) -> String {
    let width = RateKind::ALL
        .iter()
        .map(|kind| state.slider(*kind).label.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for kind in RateKind::ALL {
        let slider = state.slider(kind);
        let range = format!(
            "[{:.1} .. {:.1}, step {:.1}]",
            slider.bounds.min * 100.0,
            slider.bounds.max * 100.0,
            slider.bounds.step * 100.0
        );
        out.push_str(&format!(
            "{:<width$}  {:>5.1}  {}\n",
            slider.label,
            slider.percent(),
            palette.paint(Tone::Muted, &range)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_lists_each_rate_with_range() {
        let mut state = AppState::from_config(&AppConfig::load_default().unwrap());
        state.set_rate_percent(RateKind::Selling, 6.5).unwrap();
        let out = render(&state, &ThemePalette::plain());
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("Selling Expense Rate (%)"));
        assert!(rows[0].contains("  6.5  [4.0 .. 8.0, step 0.5]"));
        assert!(rows[1].contains(" 20.0  [15.0 .. 25.0, step 0.5]"));
        assert!(rows[2].contains(" 40.0  [30.0 .. 50.0, step 0.5]"));
    }
}
