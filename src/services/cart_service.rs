use uuid::Uuid;

use crate::{
    dto::cart::{AddToCartRequest, CartTotals},
    error::{EngineError, EngineResult},
    models::{CartLineItem, ConfigSelection, DEFAULT_WARRANTY_ID, Product},
};

use super::pricing_service;

/// Session-owned cart. The only mutable state in the engine; every mutation
/// re-derives the affected line's unit price through the calculator.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Adds a line for the product, or updates the quantity of an existing line
/// with the same configuration and warranty. Returns the line id.
pub fn add_to_cart(
    cart: &mut Cart,
    product: &Product,
    payload: AddToCartRequest,
) -> EngineResult<Uuid> {
    if payload.product_id != product.id {
        return Err(EngineError::BadRequest("product not found".to_string()));
    }

    let warranty_id = payload
        .selected_warranty
        .filter(|w| !w.is_empty())
        .unwrap_or_else(|| DEFAULT_WARRANTY_ID.to_string());
    let quote = pricing_service::quote(
        product,
        &payload.selected_config,
        Some(&warranty_id),
        payload.quantity,
    )?;

    if let Some(line) = cart.items.iter_mut().find(|l| {
        l.product.id == product.id
            && l.selection == payload.selected_config
            && l.warranty_id == warranty_id
    }) {
        line.quantity = payload.quantity;
        line.unit_price = quote.unit_price;
        line.tier = quote.tier;
        tracing::debug!(line = %line.id, quantity = line.quantity, "cart line updated");
        return Ok(line.id);
    }

    let line = CartLineItem {
        id: Uuid::new_v4(),
        product: product.clone(),
        selection: payload.selected_config,
        warranty_id,
        quantity: payload.quantity,
        unit_price: quote.unit_price,
        tier: quote.tier,
    };
    let id = line.id;
    cart.items.push(line);
    tracing::debug!(line = %id, "cart line added");
    Ok(id)
}

pub fn update_quantity(cart: &mut Cart, line_id: Uuid, quantity: u32) -> EngineResult<()> {
    let line = find_line(cart, line_id)?;
    let quote = pricing_service::quote(
        &line.product,
        &line.selection,
        Some(&line.warranty_id),
        quantity,
    )?;
    line.quantity = quantity;
    line.unit_price = quote.unit_price;
    line.tier = quote.tier;
    Ok(())
}

pub fn update_selection(
    cart: &mut Cart,
    line_id: Uuid,
    selection: ConfigSelection,
    warranty_id: Option<String>,
) -> EngineResult<()> {
    let line = find_line(cart, line_id)?;
    let warranty_id = warranty_id
        .filter(|w| !w.is_empty())
        .unwrap_or_else(|| DEFAULT_WARRANTY_ID.to_string());
    let quote =
        pricing_service::quote(&line.product, &selection, Some(&warranty_id), line.quantity)?;
    line.selection = selection;
    line.warranty_id = warranty_id;
    line.unit_price = quote.unit_price;
    line.tier = quote.tier;
    Ok(())
}

pub fn remove_from_cart(cart: &mut Cart, line_id: Uuid) -> EngineResult<()> {
    let before = cart.items.len();
    cart.items.retain(|l| l.id != line_id);
    if cart.items.len() == before {
        return Err(EngineError::NotFound);
    }
    Ok(())
}

pub fn clear(cart: &mut Cart) {
    cart.items.clear();
}

/// Folds priced line items into totals. The grand total sums the already
/// discounted line totals; savings measure each line against its reference
/// price; the subtotal is back-derived from the two so the identity
/// `subtotal - savings == grand_total` holds exactly.
pub fn totals(items: &[CartLineItem]) -> CartTotals {
    let mut grand_total = 0_i64;
    let mut total_savings = 0_i64;
    for line in items {
        let quantity = i64::from(line.quantity);
        grand_total += line.unit_price * quantity;
        total_savings += (line.product.reference_price() - line.unit_price) * quantity;
    }
    CartTotals {
        subtotal_before_discount: grand_total + total_savings,
        total_savings,
        grand_total,
    }
}

fn find_line(cart: &mut Cart, line_id: Uuid) -> EngineResult<&mut CartLineItem> {
    cart.items
        .iter_mut()
        .find(|l| l.id == line_id)
        .ok_or(EngineError::NotFound)
}
