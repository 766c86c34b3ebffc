use serde::Deserialize;

use crate::models::Condition;

pub const PRICE_RANGE_MIN: i64 = 0;
pub const PRICE_RANGE_MAX: i64 = 200_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    Relevance,
    BestSellers,
    PriceLow,
    PriceHigh,
    Rating,
    Discount,
    Newest,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::BestSellers => "best-sellers",
            SortMode::PriceLow => "price-low",
            SortMode::PriceHigh => "price-high",
            SortMode::Rating => "rating",
            SortMode::Discount => "discount",
            SortMode::Newest => "newest",
        }
    }

    /// Maps a URL sort parameter to a mode; unknown values are left to the
    /// caller's default.
    pub fn from_param(param: &str) -> Option<Self> {
        match param {
            "relevance" => Some(SortMode::Relevance),
            "best-sellers" => Some(SortMode::BestSellers),
            "price-low" => Some(SortMode::PriceLow),
            "price-high" => Some(SortMode::PriceHigh),
            "rating" => Some(SortMode::Rating),
            "discount" => Some(SortMode::Discount),
            "newest" => Some(SortMode::Newest),
            _ => None,
        }
    }
}

/// Active filters, free-text query, and sort mode for one catalog view.
/// Constructed fresh per view and mutated by user input; an empty dimension
/// constrains nothing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CriteriaModel {
    pub query: String,
    pub price_range: (i64, i64),
    pub brands: Vec<String>,
    pub memory: Vec<String>,
    pub storage: Vec<String>,
    pub processors: Vec<String>,
    pub screen_sizes: Vec<String>,
    pub condition: Option<Condition>,
    pub active_only: bool,
    pub sort: SortMode,
}

impl Default for CriteriaModel {
    fn default() -> Self {
        Self {
            query: String::new(),
            price_range: (PRICE_RANGE_MIN, PRICE_RANGE_MAX),
            brands: Vec::new(),
            memory: Vec::new(),
            storage: Vec::new(),
            processors: Vec::new(),
            screen_sizes: Vec::new(),
            condition: None,
            active_only: false,
            sort: SortMode::Relevance,
        }
    }
}

impl CriteriaModel {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_price_range(&mut self, min: i64, max: i64) {
        self.price_range = (min, max);
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    pub fn set_condition(&mut self, condition: Option<Condition>) {
        self.condition = condition;
    }

    pub fn toggle_brand(&mut self, brand: &str) {
        toggle(&mut self.brands, brand);
    }

    pub fn toggle_memory(&mut self, memory: &str) {
        toggle(&mut self.memory, memory);
    }

    pub fn toggle_storage(&mut self, storage: &str) {
        toggle(&mut self.storage, storage);
    }

    pub fn toggle_processor(&mut self, processor: &str) {
        toggle(&mut self.processors, processor);
    }

    pub fn toggle_screen_size(&mut self, screen_size: &str) {
        toggle(&mut self.screen_sizes, screen_size);
    }

    pub fn has_active_filters(&self) -> bool {
        !self.query.trim().is_empty()
            || self.price_range != (PRICE_RANGE_MIN, PRICE_RANGE_MAX)
            || !self.brands.is_empty()
            || !self.memory.is_empty()
            || !self.storage.is_empty()
            || !self.processors.is_empty()
            || !self.screen_sizes.is_empty()
            || self.condition.is_some()
    }

    /// Resets every filter and the query; the chosen sort mode survives.
    pub fn clear_filters(&mut self) {
        let sort = self.sort;
        let active_only = self.active_only;
        *self = Self::default();
        self.sort = sort;
        self.active_only = active_only;
    }
}

fn toggle(values: &mut Vec<String>, value: &str) {
    if let Some(pos) = values.iter().position(|v| v == value) {
        values.remove(pos);
    } else {
        values.push(value.to_string());
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

/// Category slugs arrive hyphenated from the router; the catalog service
/// stores lowercase names with spaces.
pub fn normalize_category_slug(slug: &str) -> String {
    slug.trim().to_lowercase().replace('-', " ")
}
