// Dashboard configuration, mirroring assets/config/default.json
pub mod theme;

use anyhow::{anyhow, bail, Context, Result};
use engine::config::{ColumnNames, LoaderSettings};
use serde::Deserialize;
use shared::models::{RateBounds, ADMIN_RATE_BOUNDS, SELLING_RATE_BOUNDS, TAX_RATE_BOUNDS};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub version: String,
    pub app: AppSettings,
    pub data: DataSettings,
    pub scenario: ScenarioSettings,
    pub chart: ChartConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub title: String,
    pub currency: String,
    #[serde(default = "default_true")]
    pub color: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    pub file_path: PathBuf,
    pub csv_delimiter: String, // Should be char, but JSON string is easier
    pub thousand_separator: String,
    pub date_format: String,
    #[serde(default)]
    pub columns: ColumnNames,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioSettings {
    pub selling_rate: SliderSetting,
    pub admin_rate: SliderSetting,
    pub tax_rate: SliderSetting,
}

// Slider values are in percent, as shown to the user.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SliderSetting {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub width: usize,
    pub bar_char: char,
    pub negative_bar_char: char,
}

fn default_true() -> bool {
    true
}

fn single_char(field: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(anyhow!("'{}' must be exactly one character, got '{}'", field, value)),
    }
}

impl DataSettings {
    pub fn loader_settings(&self) -> Result<LoaderSettings> {
        Ok(LoaderSettings {
            delimiter: single_char("data.csv_delimiter", &self.csv_delimiter)?,
            thousands_separator: single_char("data.thousand_separator", &self.thousand_separator)?,
            date_format: self.date_format.clone(),
            columns: self.columns.clone(),
        })
    }
}

impl SliderSetting {
    pub fn to_bounds(&self) -> RateBounds {
        RateBounds {
            min: self.min / 100.0,
            max: self.max / 100.0,
            step: self.step / 100.0,
            default: self.default / 100.0,
        }
    }

    // A slider may narrow the business range but never widen it.
    fn validate(&self, name: &str, allowed: RateBounds) -> Result<()> {
        let bounds = self.to_bounds();
        if !(bounds.step > 0.0) {
            bail!("scenario.{}: step must be positive", name);
        }
        if !(bounds.min <= bounds.default && bounds.default <= bounds.max) {
            bail!("scenario.{}: default {} is outside [{}, {}]", name, self.default, self.min, self.max);
        }
        if !allowed.contains(bounds.min) || !allowed.contains(bounds.max) {
            bail!(
                "scenario.{}: range [{}, {}] exceeds the allowed [{}, {}]",
                name,
                self.min,
                self.max,
                allowed.min * 100.0,
                allowed.max * 100.0
            );
        }
        Ok(())
    }
}

impl AppConfig {
    // The default configuration is compiled into the binary.
    pub fn load_default() -> Result<Self> {
        let config_str = include_str!("../../assets/config/default.json");
        Self::from_json(config_str).context("embedded default configuration is invalid")
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration file '{}'", path.display()))?;
        Self::from_json(&config_str).with_context(|| format!("invalid configuration file '{}'", path.display()))
    }

    pub fn from_json(config_str: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.scenario.selling_rate.validate("selling_rate", SELLING_RATE_BOUNDS)?;
        self.scenario.admin_rate.validate("admin_rate", ADMIN_RATE_BOUNDS)?;
        self.scenario.tax_rate.validate("tax_rate", TAX_RATE_BOUNDS)?;
        self.data.loader_settings()?.validate()?;
        if self.chart.width == 0 {
            bail!("chart.width must be greater than 0");
        }
        Ok(())
    }
}
