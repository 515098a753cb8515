// Loader settings: how the transactions file is laid out.
use serde::Deserialize;

use crate::error::EngineError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoaderSettings {
    pub delimiter: char,
    pub thousands_separator: char,
    pub date_format: String,
    pub columns: ColumnNames,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ColumnNames {
    pub order_date: String,
    pub sales: String,
    pub cost: String,
    pub category: String,
    pub brand: String,
    pub city: String,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        LoaderSettings {
            delimiter: ',',
            thousands_separator: ',',
            date_format: "%d-%b-%y".to_string(),
            columns: ColumnNames::default(),
        }
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            order_date: "Order Date".to_string(),
            sales: "Sales".to_string(),
            cost: "Cost".to_string(),
            category: "Product Category".to_string(),
            brand: "Brand".to_string(),
            city: "City".to_string(),
        }
    }
}

impl LoaderSettings {
    // csv::ReaderBuilder takes a single byte delimiter.
    pub fn delimiter_byte(&self) -> Option<u8> {
        u8::try_from(self.delimiter).ok().filter(|b| b.is_ascii())
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.delimiter_byte().is_none() {
            return Err(EngineError::ConfigError(format!(
                "CSV delimiter '{}' must be a single ASCII character",
                self.delimiter
            )));
        }
        if self.date_format.trim().is_empty() {
            return Err(EngineError::ConfigError("date format must not be empty".to_string()));
        }
        if let Some(column) = self.required_columns().iter().find(|c| c.trim().is_empty()) {
            return Err(EngineError::ConfigError(format!("column name '{}' must not be blank", column)));
        }
        Ok(())
    }

    // Required columns in the order they are checked.
    pub fn required_columns(&self) -> [&str; 6] {
        [
            self.columns.order_date.as_str(),
            self.columns.sales.as_str(),
            self.columns.cost.as_str(),
            self.columns.category.as_str(),
            self.columns.brand.as_str(),
            self.columns.city.as_str(),
        ]
    }
}
