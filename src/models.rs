use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Specification keys the catalog service uses for filterable hardware facts.
pub mod spec_keys {
    pub const PROCESSOR: &str = "processor";
    pub const RAM: &str = "ram";
    pub const STORAGE: &str = "storage";
    pub const SCREEN_SIZE: &str = "screenSize";
}

/// Id of the synthetic warranty choice representing the included warranty.
pub const DEFAULT_WARRANTY_ID: &str = "default";

pub const STANDARD_WARRANTY_LABEL: &str = "Standard Warranty";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Refurbished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VariantKind {
    Memory,
    Storage,
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantKind::Memory => f.write_str("memory"),
            VariantKind::Storage => f.write_str("storage"),
        }
    }
}

/// A selectable hardware option with a signed price delta against the base
/// price. The zero-adjustment variant per kind is the implicit default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationVariant {
    pub kind: VariantKind,
    pub value: String,
    pub price_adjustment: i64,
}

/// An extended-warranty surcharge. The duration label doubles as the option
/// id, since the catalog service does not assign ids to these subdocuments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarrantyOption {
    pub duration: String,
    pub price: i64,
}

/// A warranty the buyer can pick: the synthetic included one plus every
/// purchasable option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarrantyChoice {
    pub id: String,
    pub label: String,
    pub price: i64,
}

/// Canonical product shape. Built once from a raw catalog record with every
/// default applied; the engine never re-derives defaults downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub base_price: i64,
    pub mrp: Option<i64>,
    pub bulk_price: Option<i64>,
    pub discount_percentage: f64,
    pub rating: f64,
    pub reviews_count: i64,
    pub sold_count: i64,
    pub condition: Condition,
    pub is_active: bool,
    pub specifications: BTreeMap<String, String>,
    pub configuration_variants: Vec<ConfigurationVariant>,
    pub warranty_options: Vec<WarrantyOption>,
    pub default_warranty: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn spec(&self, key: &str) -> Option<&str> {
        self.specifications.get(key).map(String::as_str)
    }

    pub fn variants_of(&self, kind: VariantKind) -> impl Iterator<Item = &ConfigurationVariant> {
        self.configuration_variants
            .iter()
            .filter(move |v| v.kind == kind)
    }

    pub fn has_variants_of(&self, kind: VariantKind) -> bool {
        self.variants_of(kind).next().is_some()
    }

    /// The variant preselected for a kind: zero adjustment wins, else the
    /// first one listed.
    pub fn default_variant(&self, kind: VariantKind) -> Option<&ConfigurationVariant> {
        self.variants_of(kind)
            .find(|v| v.price_adjustment == 0)
            .or_else(|| self.variants_of(kind).next())
    }

    pub fn warranty_choices(&self) -> Vec<WarrantyChoice> {
        let mut choices = vec![WarrantyChoice {
            id: DEFAULT_WARRANTY_ID.to_string(),
            label: self
                .default_warranty
                .clone()
                .unwrap_or_else(|| STANDARD_WARRANTY_LABEL.to_string()),
            price: 0,
        }];
        choices.extend(self.warranty_options.iter().map(|w| WarrantyChoice {
            id: w.duration.clone(),
            label: w.duration.clone(),
            price: w.price,
        }));
        choices
    }

    /// Price savings are measured against: the MRP when it is present and at
    /// least the base price, otherwise the base price itself.
    pub fn reference_price(&self) -> i64 {
        match self.mrp {
            Some(mrp) if mrp >= self.base_price => mrp,
            _ => self.base_price,
        }
    }
}

/// The buyer's memory/storage picks for one product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSelection {
    #[serde(default, alias = "ram")]
    pub memory: Option<String>,
    #[serde(default)]
    pub storage: Option<String>,
}

impl ConfigSelection {
    pub fn new(memory: impl Into<String>, storage: impl Into<String>) -> Self {
        Self {
            memory: Some(memory.into()),
            storage: Some(storage.into()),
        }
    }

    /// Preselects the default variant of each kind the product defines.
    pub fn defaults_for(product: &Product) -> Self {
        Self {
            memory: product
                .default_variant(VariantKind::Memory)
                .map(|v| v.value.clone()),
            storage: product
                .default_variant(VariantKind::Storage)
                .map(|v| v.value.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Retail,
    Bulk,
}

impl PriceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTier::Retail => "retail",
            PriceTier::Bulk => "bulk",
        }
    }
}

/// One product entry in a session cart. Quantity and selection mutation is
/// owned by the session; unit price and tier are re-derived on every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineItem {
    pub id: Uuid,
    pub product: Product,
    pub selection: ConfigSelection,
    pub warranty_id: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub tier: PriceTier,
}

impl CartLineItem {
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}
