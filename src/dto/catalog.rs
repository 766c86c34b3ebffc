//! Tolerant shapes for the JSON the catalog service returns. Upstream data
//! quality varies, so every field is optional here and normalized exactly
//! once into the canonical [`Product`] shape.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::models::{Condition, ConfigurationVariant, Product, VariantKind, WarrantyOption};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub mrp: Option<f64>,
    #[serde(default, alias = "b2bPrice")]
    pub bulk_price: Option<f64>,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews_count: Option<i64>,
    #[serde(default)]
    pub sold_count: Option<i64>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub specifications: BTreeMap<String, Value>,
    #[serde(default)]
    pub configuration_variants: Vec<VariantRecord>,
    #[serde(default)]
    pub warranty_options: Vec<WarrantyRecord>,
    #[serde(default)]
    pub default_warranty: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub price_adjustment: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyRecord {
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl ProductRecord {
    /// Coerces the record to the canonical shape, applying every default in
    /// one place. A missing discount is derived from MRP and base price.
    pub fn normalize(self) -> Product {
        let base_price = to_amount(self.base_price);
        let mrp = self.mrp.map(|v| to_amount(Some(v))).filter(|v| *v > 0);
        let discount_percentage = self
            .discount_percentage
            .unwrap_or_else(|| derive_discount(mrp, base_price))
            .max(0.0);

        Product {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            brand: self.brand.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            base_price,
            mrp,
            bulk_price: self.bulk_price.map(|v| to_amount(Some(v))).filter(|v| *v > 0),
            discount_percentage,
            rating: self.rating.unwrap_or(0.0).clamp(0.0, 5.0),
            reviews_count: self.reviews_count.unwrap_or(0).max(0),
            sold_count: self.sold_count.unwrap_or(0).max(0),
            condition: parse_condition(self.condition.as_deref()),
            is_active: self.is_active.unwrap_or(true),
            specifications: self
                .specifications
                .into_iter()
                .filter_map(|(key, value)| stringify_spec(value).map(|v| (key, v)))
                .collect(),
            configuration_variants: self
                .configuration_variants
                .into_iter()
                .filter_map(VariantRecord::normalize)
                .collect(),
            warranty_options: self
                .warranty_options
                .into_iter()
                .filter_map(WarrantyRecord::normalize)
                .collect(),
            default_warranty: self.default_warranty.filter(|w| !w.is_empty()),
            created_at: self.created_at.unwrap_or(DateTime::UNIX_EPOCH),
        }
    }
}

impl VariantRecord {
    fn normalize(self) -> Option<ConfigurationVariant> {
        let kind = match self.kind.as_deref() {
            Some("RAM") | Some("MEMORY") => VariantKind::Memory,
            Some("STORAGE") => VariantKind::Storage,
            _ => return None,
        };
        let value = self.value.filter(|v| !v.is_empty())?;
        Some(ConfigurationVariant {
            kind,
            value,
            price_adjustment: self.price_adjustment.unwrap_or(0.0).round() as i64,
        })
    }
}

impl WarrantyRecord {
    fn normalize(self) -> Option<WarrantyOption> {
        let duration = self.duration.filter(|d| !d.is_empty())?;
        Some(WarrantyOption {
            duration,
            price: to_amount(self.price),
        })
    }
}

pub fn normalize_products(records: Vec<ProductRecord>) -> Vec<Product> {
    records.into_iter().map(ProductRecord::normalize).collect()
}

fn to_amount(value: Option<f64>) -> i64 {
    (value.unwrap_or(0.0).round() as i64).max(0)
}

fn derive_discount(mrp: Option<i64>, base_price: i64) -> f64 {
    match mrp {
        Some(mrp) if mrp > base_price => {
            (((mrp - base_price) as f64 / mrp as f64) * 100.0).round()
        }
        _ => 0.0,
    }
}

fn parse_condition(condition: Option<&str>) -> Condition {
    match condition {
        Some(c) if c.eq_ignore_ascii_case("refurbished") => Condition::Refurbished,
        _ => Condition::New,
    }
}

// Null spec values are treated as absent, so a filter on that key fails
// instead of matching the empty string.
fn stringify_spec(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
