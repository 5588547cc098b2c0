//! Shop-page product filter.
//!
//! Five independent criteria combined with logical AND:
//!
//! | Criterion | Passes when | No-op value |
//! |-----------|-------------|-------------|
//! | category  | product category equals it | `None` ("all") |
//! | max price | product price is at most it | - |
//! | tags      | every selected tag is on the product | empty |
//! | brands    | product brand is one of them | empty |
//! | search    | name or brand contains it, case-insensitively | empty |

use serde::{Deserialize, Serialize};

use crate::types::{Category, Price, Product};

/// Default price ceiling of the shop sidebar slider.
pub const DEFAULT_MAX_PRICE: u32 = 7000;

/// Filter criteria for the shop page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// `None` means all categories.
    pub category: Option<Category>,
    pub max_price: Price,
    /// Selected tags, in the order they were selected.
    pub tags: Vec<String>,
    /// Selected brands, in the order they were selected.
    pub brands: Vec<String>,
    pub search: String,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            max_price: Price::npr(DEFAULT_MAX_PRICE),
            tags: Vec::new(),
            brands: Vec::new(),
            search: String::new(),
        }
    }
}

impl ProductFilter {
    /// Build a filter from decoded query-string pairs.
    ///
    /// Recognised keys are `category`, `max_price`, `tag` (repeatable),
    /// `brand` (repeatable) and `q`. Unknown keys are ignored and unparseable
    /// values fall back to the default for that criterion.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "category" => filter.category = value.parse().ok(),
                "max_price" => {
                    if let Ok(max) = value.trim().parse::<u32>() {
                        filter.max_price = Price::npr(max);
                    }
                }
                "tag" if !value.is_empty() => filter.select_tag(value),
                "brand" if !value.is_empty() => filter.select_brand(value),
                "q" => value.clone_into(&mut filter.search),
                _ => {}
            }
        }
        filter
    }

    /// The query-string pairs that reproduce this filter.
    ///
    /// Criteria at their default value are omitted.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push(("category", category.slug().to_owned()));
        }
        if self.max_price != Price::npr(DEFAULT_MAX_PRICE) {
            pairs.push(("max_price", self.max_price.whole_units().to_string()));
        }
        pairs.extend(self.tags.iter().map(|t| ("tag", t.clone())));
        pairs.extend(self.brands.iter().map(|b| ("brand", b.clone())));
        if !self.search.is_empty() {
            pairs.push(("q", self.search.clone()));
        }
        pairs
    }

    /// Whether a product satisfies every active criterion.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product)
            && product.price <= self.max_price
            && self.tags.iter().all(|tag| product.has_tag(tag))
            && (self.brands.is_empty() || self.brands.contains(&product.brand))
            && self.matches_search(product)
    }

    /// The products satisfying the filter, in input order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    /// Select the tag if absent, deselect it if present.
    pub fn toggle_tag(&mut self, tag: &str) {
        toggle(&mut self.tags, tag);
    }

    /// Select the brand if absent, deselect it if present.
    pub fn toggle_brand(&mut self, brand: &str) {
        toggle(&mut self.brands, brand);
    }

    /// Whether the tag is currently selected.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether the brand is currently selected.
    #[must_use]
    pub fn has_brand(&self, brand: &str) -> bool {
        self.brands.iter().any(|b| b == brand)
    }

    /// Reset every criterion.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether no criterion narrows the list.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    fn select_tag(&mut self, tag: &str) {
        if !self.has_tag(tag) {
            self.tags.push(tag.to_owned());
        }
    }

    fn select_brand(&mut self, brand: &str) {
        if !self.has_brand(brand) {
            self.brands.push(brand.to_owned());
        }
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.category.is_none_or(|c| product.category == c)
    }

    fn matches_search(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        product.name.to_lowercase().contains(&needle)
            || product.brand.to_lowercase().contains(&needle)
    }
}

fn toggle(selected: &mut Vec<String>, value: &str) {
    if let Some(pos) = selected.iter().position(|v| v == value) {
        selected.remove(pos);
    } else {
        selected.push(value.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_default_filter_returns_everything_in_order() {
        let products = fixtures::products();
        let filtered = ProductFilter::default().apply(&products);
        assert_eq!(filtered.len(), products.len());
        assert!(filtered.iter().zip(&products).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_category_filter() {
        let products = fixtures::products();
        let filter = ProductFilter {
            category: Some(Category::Customizable),
            ..ProductFilter::default()
        };
        assert_eq!(names(&filter.apply(&products)), ["Design-Your-Own Dreamer"]);
    }

    #[test]
    fn test_price_ceiling_is_inclusive() {
        let products = fixtures::products();
        let filter = ProductFilter {
            max_price: Price::npr(2900),
            ..ProductFilter::default()
        };
        assert_eq!(
            names(&filter.apply(&products)),
            ["Little Himal Sandals", "Rhododendron Bloom Shoes"]
        );
    }

    #[test]
    fn test_tags_must_all_be_present() {
        let products = fixtures::products();
        let mut filter = ProductFilter::default();
        filter.toggle_tag("Outdoor");
        assert_eq!(names(&filter.apply(&products)), ["Little Himal Sandals"]);

        filter.toggle_tag("Formal");
        assert!(filter.apply(&products).is_empty());
    }

    #[test]
    fn test_brands_are_alternatives() {
        let products = fixtures::products();
        let mut filter = ProductFilter::default();
        filter.toggle_brand("Flora Feet");
        filter.toggle_brand("Heritage Hub");
        assert_eq!(
            names(&filter.apply(&products)),
            ["Dhaka Dash Sneakers", "Rhododendron Bloom Shoes"]
        );
    }

    #[test]
    fn test_search_matches_name_or_brand_case_insensitively() {
        let products = fixtures::products();
        let mut filter = ProductFilter {
            search: "HIMAL".to_owned(),
            ..ProductFilter::default()
        };
        assert_eq!(names(&filter.apply(&products)), ["Little Himal Sandals"]);

        "scholar".clone_into(&mut filter.search);
        assert_eq!(names(&filter.apply(&products)), ["Temple Walk School Shoes"]);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let products = fixtures::products();
        let filter = ProductFilter {
            category: Some(Category::ReadyMade),
            max_price: Price::npr(3500),
            brands: vec!["Scholar Step".to_owned(), "Labs Custom".to_owned()],
            ..ProductFilter::default()
        };
        assert_eq!(names(&filter.apply(&products)), ["Temple Walk School Shoes"]);
    }

    #[test]
    fn test_filter_equals_brute_force_subset() {
        let products = fixtures::products();
        let categories = [None, Some(Category::ReadyMade), Some(Category::Customizable)];
        let prices = [0, 2400, 3000, 7000];
        let searches = ["", "s", "dreamer"];
        for category in categories {
            for price in prices {
                for search in searches {
                    let filter = ProductFilter {
                        category,
                        max_price: Price::npr(price),
                        search: search.to_owned(),
                        ..ProductFilter::default()
                    };
                    let expected: Vec<&Product> = products
                        .iter()
                        .filter(|p| category.is_none_or(|c| p.category == c))
                        .filter(|p| p.price <= Price::npr(price))
                        .filter(|p| {
                            p.name.to_lowercase().contains(search)
                                || p.brand.to_lowercase().contains(search)
                        })
                        .collect();
                    assert_eq!(filter.apply(&products), expected);
                }
            }
        }
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut filter = ProductFilter::default();
        filter.toggle_brand("Flora Feet");
        let before = filter.clone();

        filter.toggle_tag("Casual");
        filter.toggle_tag("Casual");
        filter.toggle_brand("Heritage Hub");
        filter.toggle_brand("Heritage Hub");

        assert_eq!(filter, before);
    }

    #[test]
    fn test_clear_resets_to_default() {
        let mut filter = ProductFilter::from_pairs([("category", "customizable"), ("q", "x")]);
        assert!(!filter.is_default());
        filter.clear();
        assert!(filter.is_default());
    }

    #[test]
    fn test_from_pairs_parses_every_criterion() {
        let filter = ProductFilter::from_pairs([
            ("category", "ready-made"),
            ("max_price", "3000"),
            ("tag", "Casual"),
            ("tag", "Floral"),
            ("tag", "Casual"),
            ("brand", "Flora Feet"),
            ("q", "bloom"),
            ("utm_source", "newsletter"),
        ]);
        assert_eq!(filter.category, Some(Category::ReadyMade));
        assert_eq!(filter.max_price, Price::npr(3000));
        assert_eq!(filter.tags, ["Casual", "Floral"]);
        assert_eq!(filter.brands, ["Flora Feet"]);
        assert_eq!(filter.search, "bloom");
    }

    #[test]
    fn test_from_pairs_falls_back_on_bad_values() {
        let filter = ProductFilter::from_pairs([
            ("category", "all"),
            ("max_price", "lots"),
            ("tag", ""),
        ]);
        assert!(filter.is_default());
    }

    #[test]
    fn test_to_pairs_round_trips() {
        let filter = ProductFilter::from_pairs([
            ("category", "customizable"),
            ("max_price", "6500"),
            ("brand", "Labs Custom"),
            ("q", "dream"),
        ]);
        assert_eq!(ProductFilter::from_pairs(filter.to_pairs()), filter);
        assert!(ProductFilter::default().to_pairs().is_empty());
    }
}
