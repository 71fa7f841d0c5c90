use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::core::features::unit_converter::Category;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../target/ts-bindings/")]
#[serde(rename_all = "camelCase")]
pub struct UnitDTO {
    pub symbol: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../target/ts-bindings/")]
#[serde(rename_all = "camelCase")]
pub struct CategoryDTO {
    pub id: Category,
    pub label: String,
    pub basis_unit: String,
    pub units: Vec<UnitDTO>,
    pub default_from_unit: String,
    pub default_to_unit: String,
}

impl From<Category> for CategoryDTO {
    fn from(category: Category) -> Self {
        let (default_from, default_to) = category.default_units();
        Self {
            id: category,
            label: category.label().to_string(),
            basis_unit: category.basis_unit().to_string(),
            units: category
                .units()
                .iter()
                .map(|def| UnitDTO {
                    symbol: def.symbol.to_string(),
                    name: def.name.to_string(),
                })
                .collect(),
            default_from_unit: default_from.to_string(),
            default_to_unit: default_to.to_string(),
        }
    }
}

/// A conversion as submitted by the UI; `value` is the raw input text
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../target/ts-bindings/")]
#[serde(rename_all = "camelCase")]
pub struct ConvertUnitsRequest {
    pub category: Category,
    pub value: String,
    pub from_unit: String,
    pub to_unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../target/ts-bindings/")]
#[serde(rename_all = "camelCase")]
pub struct ConvertUnitsResponse {
    pub result: f64,
    pub formatted_result: String,
    pub from_unit: String,
    pub to_unit: String,
    /// Set when the conversion was recorded in history
    #[ts(type = "number | null")]
    pub history_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../target/ts-bindings/")]
#[serde(rename_all = "camelCase")]
pub struct QuickCompareRequest {
    pub category: Category,
    pub value: String,
    pub from_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../target/ts-bindings/")]
pub struct QuickCompareItem {
    pub unit: String,
    pub value: f64,
    pub formatted: String,
}

/// One successful conversion, newest entries first in the log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../target/ts-bindings/")]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[ts(type = "number")]
    pub id: u64,
    pub category: Category,
    pub value: String,
    pub from_unit: String,
    pub to_unit: String,
    pub result: String,
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// One-line summary, e.g. `1 km = 1000 m`
    pub fn summary(&self) -> String {
        format!("{} {} = {} {}", self.value, self.from_unit, self.result, self.to_unit)
    }
}

/// Data for a new history entry; id and timestamp are assigned on record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../target/ts-bindings/")]
#[serde(rename_all = "camelCase")]
pub struct NewHistoryEntry {
    pub category: Category,
    pub value: String,
    pub from_unit: String,
    pub to_unit: String,
    pub result: String,
}

impl NewHistoryEntry {
    pub fn into_entry(self, id: u64, timestamp: DateTime<Utc>) -> HistoryEntry {
        HistoryEntry {
            id,
            category: self.category,
            value: self.value,
            from_unit: self.from_unit,
            to_unit: self.to_unit,
            result: self.result,
            timestamp,
        }
    }
}
