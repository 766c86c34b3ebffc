use serde::{Deserialize, Serialize};

use crate::models::ConfigSelection;

#[derive(Debug, Clone, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub selected_config: ConfigSelection,
    #[serde(default)]
    pub selected_warranty: Option<String>,
}

/// Totals for a cart. The grand total is authoritative; the subtotal is
/// back-derived so `subtotal - savings == grand_total` holds exactly. The
/// cart service recomputes these server-side at checkout and must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub subtotal_before_discount: i64,
    pub total_savings: i64,
    pub grand_total: i64,
}
