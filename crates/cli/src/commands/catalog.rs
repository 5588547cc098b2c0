//! Print the catalog through the shop filter.

use std::io::{self, Write};

use kicklabs_core::catalog::filter::DEFAULT_MAX_PRICE;
use kicklabs_core::{Catalog, Category, Price, ProductFilter};
use tracing::info;

/// Assemble a shop filter from command-line arguments.
#[must_use]
pub fn build_filter(
    category: Option<Category>,
    max_price: Option<u32>,
    tags: Vec<String>,
    brands: Vec<String>,
    search: String,
) -> ProductFilter {
    let mut filter = ProductFilter {
        category,
        max_price: Price::npr(max_price.unwrap_or(DEFAULT_MAX_PRICE)),
        search,
        ..ProductFilter::default()
    };
    for tag in tags {
        if !filter.has_tag(&tag) {
            filter.toggle_tag(&tag);
        }
    }
    for brand in brands {
        if !filter.has_brand(&brand) {
            filter.toggle_brand(&brand);
        }
    }
    filter
}

/// Write one line per matching product.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list(out: &mut impl Write, filter: &ProductFilter) -> io::Result<()> {
    let catalog = Catalog::fixtures();
    let products = catalog.filter(filter);
    info!(matches = products.len(), total = catalog.products().len(), "Filtered catalog");

    for product in &products {
        writeln!(
            out,
            "{:>3}  {:<28} {:<16} {:>10}  {}",
            product.id.to_string(),
            product.name,
            product.brand,
            product.price.display(),
            product.tags.join(", ")
        )?;
    }
    if products.is_empty() {
        writeln!(out, "No matching shoes found")?;
    }
    Ok(())
}
