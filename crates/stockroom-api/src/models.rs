// Wire types for the catalog endpoint.
//
// The endpoint is loosely typed: `price` and `quantity` show up either as
// JSON numbers or as formatted strings (`"$12.50"`, `"7"`). These types
// keep whatever arrived; normalization lives in `stockroom-core`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// A JSON scalar that is either a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

impl Default for NumberOrText {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl fmt::Display for NumberOrText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One product record exactly as the catalog serves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: NumberOrText,
    #[serde(default)]
    pub quantity: NumberOrText,
    /// Fields the dashboard does not use.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
