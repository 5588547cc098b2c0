//! The in-memory product catalog.
//!
//! The catalog is built once from the fixture list and shared read-only.

pub mod filter;
pub mod fixtures;

pub use filter::{DEFAULT_MAX_PRICE, ProductFilter};

use crate::types::{Product, ProductId};

/// Read-only product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The catalog backed by the fixture list.
    #[must_use]
    pub fn fixtures() -> Self {
        Self::new(fixtures::products())
    }

    /// Every product, in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// The first `n` products, shown on the home page.
    #[must_use]
    pub fn featured(&self, n: usize) -> &[Product] {
        self.products.get(..n).unwrap_or(&self.products)
    }

    /// The customizable product that workshop designs are attached to.
    #[must_use]
    pub fn design_base(&self) -> Option<&Product> {
        self.products.iter().find(|p| p.is_customizable())
    }

    /// Products matching the filter, in catalog order.
    #[must_use]
    pub fn filter(&self, filter: &ProductFilter) -> Vec<&Product> {
        filter.apply(&self.products)
    }

    /// Distinct tags across the catalog, in first-seen order.
    #[must_use]
    pub fn all_tags(&self) -> Vec<&str> {
        distinct(self.products.iter().flat_map(|p| p.tags.iter().map(String::as_str)))
    }

    /// Distinct brands across the catalog, in first-seen order.
    #[must_use]
    pub fn all_brands(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.brand.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
