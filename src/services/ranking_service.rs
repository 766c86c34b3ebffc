use crate::{criteria::SortMode, models::Product};

// The weighting favors proven sales volume over rating-derived popularity.
// Both weights are business rules owned by product, not engineering.
pub const BEST_SELLER_RATING_WEIGHT: f64 = 0.3;
pub const BEST_SELLER_SALES_WEIGHT: f64 = 0.7;

/// Orders a collection by the given mode. Sorts are stable, so equal keys
/// keep their pre-sort relative order; `Relevance` preserves input order.
pub fn sort(mut products: Vec<Product>, mode: SortMode) -> Vec<Product> {
    match mode {
        SortMode::Relevance => {}
        SortMode::PriceLow => products.sort_by(|a, b| a.base_price.cmp(&b.base_price)),
        SortMode::PriceHigh => products.sort_by(|a, b| b.base_price.cmp(&a.base_price)),
        SortMode::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortMode::Discount => {
            products.sort_by(|a, b| b.discount_percentage.total_cmp(&a.discount_percentage))
        }
        SortMode::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::BestSellers => {
            products.sort_by(|a, b| best_seller_score(b).total_cmp(&best_seller_score(a)))
        }
    }
    products
}

/// Composite ranking score blending rating-weighted popularity and raw sales
/// volume. Pure: identical inputs always produce the same score.
pub fn best_seller_score(product: &Product) -> f64 {
    product.rating * product.reviews_count as f64 * BEST_SELLER_RATING_WEIGHT
        + product.sold_count as f64 * BEST_SELLER_SALES_WEIGHT
}

/// Top `limit` active products by best-seller score, for the storefront's
/// best-sellers rail.
pub fn best_sellers(products: &[Product], limit: usize) -> Vec<Product> {
    top_active(products, SortMode::BestSellers, limit)
}

/// Top `limit` active products by discount percentage.
pub fn best_deals(products: &[Product], limit: usize) -> Vec<Product> {
    top_active(products, SortMode::Discount, limit)
}

fn top_active(products: &[Product], mode: SortMode, limit: usize) -> Vec<Product> {
    let active: Vec<Product> = products.iter().filter(|p| p.is_active).cloned().collect();
    sort(active, mode).into_iter().take(limit).collect()
}
