use crate::{
    error::{EngineError, EngineResult},
    models::{ConfigSelection, DEFAULT_WARRANTY_ID, PriceTier, Product, VariantKind},
};

/// Order quantity at which pricing switches to the bulk tier. Fixed business
/// rule; callers crossing it must surface the bulk quotation workflow instead
/// of silent checkout.
pub const BULK_THRESHOLD: u32 = 10;

/// Applied to the base price when a product carries no explicit bulk price.
pub const BULK_FALLBACK_MULTIPLIER: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    pub unit_price: i64,
    pub tier: PriceTier,
}

pub fn tier_for_quantity(quantity: u32) -> PriceTier {
    if quantity >= BULK_THRESHOLD {
        PriceTier::Bulk
    } else {
        PriceTier::Retail
    }
}

/// Derives the applicable unit price for one product: tier base price, plus
/// warranty surcharge, plus configuration adjustments, clamped at zero.
///
/// Refuses to price a product whose defined configuration kinds have no
/// selection; selection is mandatory before any cart mutation.
pub fn quote(
    product: &Product,
    selection: &ConfigSelection,
    warranty_id: Option<&str>,
    quantity: u32,
) -> EngineResult<PriceQuote> {
    if quantity == 0 {
        return Err(EngineError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let tier = tier_for_quantity(quantity);
    let base = match tier {
        PriceTier::Retail => product.base_price,
        PriceTier::Bulk => product
            .bulk_price
            .unwrap_or_else(|| bulk_fallback_price(product.base_price)),
    };

    let surcharge = warranty_surcharge(product, warranty_id);
    let adjustment = config_adjustment(product, selection)?;
    let unit_price = (base + surcharge + adjustment).max(0);

    Ok(PriceQuote { unit_price, tier })
}

fn bulk_fallback_price(base_price: i64) -> i64 {
    (base_price as f64 * BULK_FALLBACK_MULTIPLIER).round() as i64
}

// The included warranty and an unset selection both cost nothing. An id with
// no matching option also resolves to zero: catalogs may be edited while a
// session holds a stale id, and that is not an error.
fn warranty_surcharge(product: &Product, warranty_id: Option<&str>) -> i64 {
    let Some(id) = warranty_id.filter(|id| !id.is_empty() && *id != DEFAULT_WARRANTY_ID) else {
        return 0;
    };
    match product.warranty_choices().into_iter().find(|w| w.id == id) {
        Some(choice) => choice.price,
        None => {
            tracing::warn!(product = %product.id, warranty = id, "warranty option not found");
            0
        }
    }
}

fn config_adjustment(product: &Product, selection: &ConfigSelection) -> EngineResult<i64> {
    let memory = kind_adjustment(product, VariantKind::Memory, selection.memory.as_deref())?;
    let storage = kind_adjustment(product, VariantKind::Storage, selection.storage.as_deref())?;
    Ok(memory + storage)
}

fn kind_adjustment(
    product: &Product,
    kind: VariantKind,
    selected: Option<&str>,
) -> EngineResult<i64> {
    if !product.has_variants_of(kind) {
        return Ok(0);
    }
    let Some(value) = selected.filter(|v| !v.is_empty()) else {
        return Err(EngineError::ConfigurationRequired(kind));
    };
    match product.variants_of(kind).find(|v| v.value == value) {
        Some(variant) => Ok(variant.price_adjustment),
        None => {
            tracing::warn!(product = %product.id, %kind, value, "configuration variant not found");
            Ok(0)
        }
    }
}
