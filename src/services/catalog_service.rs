use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    criteria::{CriteriaModel, Pagination},
    models::{Product, spec_keys},
};

use super::ranking_service;

/// One full recomputation pass: filter the collection against the criteria,
/// then rank the survivors. Runs on every user interaction, so it takes the
/// product set by reference and returns a fresh collection.
pub fn search(products: &[Product], criteria: &CriteriaModel) -> Vec<Product> {
    let filtered = filter(products, criteria);
    tracing::debug!(
        total = products.len(),
        matched = filtered.len(),
        sort = criteria.sort.as_str(),
        "catalog pass"
    );
    ranking_service::sort(filtered, criteria.sort)
}

/// Applies every criteria dimension as an all-must-pass predicate chain,
/// preserving input order.
pub fn filter(products: &[Product], criteria: &CriteriaModel) -> Vec<Product> {
    products
        .iter()
        .filter(|p| matches(p, criteria))
        .cloned()
        .collect()
}

fn matches(product: &Product, criteria: &CriteriaModel) -> bool {
    matches_query(product, &criteria.query)
        && matches_price_range(product, criteria.price_range)
        && matches_brand(product, &criteria.brands)
        && matches_spec_value(product, spec_keys::RAM, &criteria.memory)
        && matches_spec_value(product, spec_keys::STORAGE, &criteria.storage)
        && matches_processor(product, &criteria.processors)
        && matches_spec_value(product, spec_keys::SCREEN_SIZE, &criteria.screen_sizes)
        && criteria.condition.is_none_or(|c| product.condition == c)
        && (!criteria.active_only || product.is_active)
}

// Substring match over name, brand, category, the numeric fields, and every
// specification value. Numeric fields compare against the query with `%` and
// `,` stripped, so "10%" and "1,999" still match.
fn matches_query(product: &Product, raw_query: &str) -> bool {
    let query = raw_query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    let numeric_query: String = query.chars().filter(|&c| c != '%' && c != ',').collect();

    product.name.to_lowercase().contains(&query)
        || product.brand.to_lowercase().contains(&query)
        || product.category.to_lowercase().contains(&query)
        || product.base_price.to_string().contains(&numeric_query)
        || product
            .discount_percentage
            .to_string()
            .contains(&numeric_query)
        || product
            .specifications
            .values()
            .any(|v| v.to_lowercase().contains(&query))
}

fn matches_price_range(product: &Product, (min, max): (i64, i64)) -> bool {
    product.base_price >= min && product.base_price <= max
}

fn matches_brand(product: &Product, brands: &[String]) -> bool {
    if brands.is_empty() {
        return true;
    }
    !product.brand.is_empty() && brands.iter().any(|b| b.eq_ignore_ascii_case(&product.brand))
}

// Selected options match as substrings of the spec value, so compound values
// like "16GB DDR4" satisfy a "16GB" filter. A product missing the key fails.
fn matches_spec_value(product: &Product, key: &str, selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }
    match product.spec(key) {
        Some(value) => selected.iter().any(|s| value.contains(s.as_str())),
        None => false,
    }
}

fn matches_processor(product: &Product, processors: &[String]) -> bool {
    if processors.is_empty() {
        return true;
    }
    match product.spec(spec_keys::PROCESSOR) {
        Some(value) => {
            let value = value.to_lowercase();
            processors.iter().any(|p| value.contains(&p.to_lowercase()))
        }
        None => false,
    }
}

pub fn page(products: &[Product], pagination: &Pagination) -> Vec<Product> {
    let (_, per_page, offset) = pagination.normalize();
    products
        .iter()
        .skip(offset as usize)
        .take(per_page as usize)
        .cloned()
        .collect()
}

/// A single facet value with its product count over a result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetValue {
    pub value: String,
    pub count: u32,
}

/// Distinct brands over a result set, most common first. Lets a view render
/// its filter sidebar from live data instead of a hard-coded list.
pub fn brand_facets(products: &[Product]) -> Vec<FacetValue> {
    facet_counts(products.iter().map(|p| p.brand.as_str()))
}

/// Distinct values of one specification key over a result set.
pub fn spec_facets(products: &[Product], key: &str) -> Vec<FacetValue> {
    facet_counts(products.iter().filter_map(|p| p.spec(key)))
}

fn facet_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<FacetValue> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for value in values.filter(|v| !v.is_empty()) {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut facets: Vec<FacetValue> = counts
        .into_iter()
        .map(|(value, count)| FacetValue {
            value: value.to_string(),
            count,
        })
        .collect();
    facets.sort_by(|a, b| b.count.cmp(&a.count));
    facets
}
