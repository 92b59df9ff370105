use crate::http::ApiResponder;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PRODUCT_CATEGORY: &str = "Geral";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    pub active: bool,
}

impl ApiResponder for Product {
    fn unit() -> &'static str {
        "product"
    }
    fn article() -> &'static str {
        "A"
    }
}

/// Body accepted by both product creation and update. Absent fields decode
/// as their zero values and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
}
