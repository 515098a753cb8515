// Scenario state: the data file in use and the three rate "sliders".
// The report is recomputed from this state on every change; nothing here is persisted.

use anyhow::Result;
use engine::EngineError;
use shared::models::{RateBounds, ScenarioParams};
use std::path::PathBuf;

use crate::config::{AppConfig, SliderSetting};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateKind {
    Selling,
    Admin,
    Tax,
}

impl RateKind {
    pub const ALL: [RateKind; 3] = [RateKind::Selling, RateKind::Admin, RateKind::Tax];

    pub fn param_name(self) -> &'static str {
        match self {
            RateKind::Selling => "selling_rate",
            RateKind::Admin => "admin_rate",
            RateKind::Tax => "tax_rate",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    pub label: String,
    pub bounds: RateBounds,
    // Fraction, always on a step and inside `bounds`.
    pub value: f64,
}

impl Slider {
    pub fn from_setting(setting: &SliderSetting) -> Self {
        let bounds = setting.to_bounds();
        Self {
            label: setting.label.clone(),
            bounds,
            value: bounds.snap(bounds.default),
        }
    }

    pub fn percent(&self) -> f64 {
        self.value * 100.0
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    selling: Slider,
    admin: Slider,
    tax: Slider,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            data_path: config.data.file_path.clone(),
            selling: Slider::from_setting(&config.scenario.selling_rate),
            admin: Slider::from_setting(&config.scenario.admin_rate),
            tax: Slider::from_setting(&config.scenario.tax_rate),
        }
    }

    pub fn slider(&self, kind: RateKind) -> &Slider {
        match kind {
            RateKind::Selling => &self.selling,
            RateKind::Admin => &self.admin,
            RateKind::Tax => &self.tax,
        }
    }

    fn slider_mut(&mut self, kind: RateKind) -> &mut Slider {
        match kind {
            RateKind::Selling => &mut self.selling,
            RateKind::Admin => &mut self.admin,
            RateKind::Tax => &mut self.tax,
        }
    }

    /// Sets a rate given in percent. Values outside the slider range are rejected,
    /// values between steps are snapped to the nearest step.
    pub fn set_rate_percent(&mut self, kind: RateKind, percent: f64) -> Result<f64> {
        let slider = self.slider_mut(kind);
        let rate = percent / 100.0;
        if !slider.bounds.contains(rate) {
            return Err(EngineError::ParameterOutOfRange {
                name: kind.param_name().to_string(),
                value: percent,
                min: slider.bounds.min * 100.0,
                max: slider.bounds.max * 100.0,
            }
            .into());
        }
        slider.value = slider.bounds.snap(rate);
        tracing::debug!(rate = kind.param_name(), value = slider.value, "Scenario rate updated");
        Ok(slider.value)
    }

    pub fn params(&self) -> ScenarioParams {
        ScenarioParams::new(self.selling.value, self.admin.value, self.tax.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::from_config(&AppConfig::load_default().unwrap())
    }

    #[test]
    fn test_defaults_from_config() {
        let params = state().params();
        assert!((params.selling_rate - 0.05).abs() < 1e-12);
        assert!((params.admin_rate - 0.20).abs() < 1e-12);
        assert!((params.tax_rate - 0.40).abs() < 1e-12);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_set_rate_snaps_to_step() {
        let mut state = state();
        let value = state.set_rate_percent(RateKind::Tax, 42.3).unwrap();
        assert!((value - 0.425).abs() < 1e-12);
        assert!((state.slider(RateKind::Tax).percent() - 42.5).abs() < 1e-9);
    }

    #[test]
    fn test_set_rate_accepts_bounds() {
        let mut state = state();
        assert!(state.set_rate_percent(RateKind::Selling, 4.0).is_ok());
        assert!(state.set_rate_percent(RateKind::Selling, 8.0).is_ok());
        assert!((state.params().selling_rate - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_set_rate_rejects_out_of_range() {
        let mut state = state();
        let err = state.set_rate_percent(RateKind::Admin, 30.0).unwrap_err();
        assert!(err.to_string().contains("admin_rate"));
        // Unchanged after a rejected update.
        assert!((state.params().admin_rate - 0.20).abs() < 1e-12);
    }
}
