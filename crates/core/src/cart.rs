//! Shopping cart accumulator.
//!
//! Lines stack by product ID: adding a ready-made product that is already in
//! the cart bumps its quantity. Lines carrying a [`CustomDesign`] never stack;
//! each workshop design becomes its own line.
//!
//! A line snapshots the product (including its price) when it is first added.
//! Later additions of the same product only change the quantity.

use serde::{Deserialize, Serialize};

use crate::types::{CustomDesign, LineId, Price, Product, ProductId};

/// Most units a single line can hold.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// A single line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: LineId,
    pub product: Product,
    /// Between 1 and [`MAX_LINE_QUANTITY`].
    pub quantity: u32,
    pub custom_design: Option<CustomDesign>,
}

impl CartLine {
    fn new(product: &Product, custom_design: Option<CustomDesign>) -> Self {
        Self {
            id: LineId::generate(),
            product: product.clone(),
            quantity: 1,
            custom_design,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }

    /// The image to show for this line: the generated design if any.
    #[must_use]
    pub fn image(&self) -> &str {
        self.custom_design
            .as_ref()
            .map_or(self.product.image.as_str(), |d| d.image_url.as_str())
    }

    /// Whether this line can absorb another unit of `product_id`.
    fn stacks_with(&self, product_id: ProductId) -> bool {
        self.custom_design.is_none() && self.product.id == product_id
    }
}

/// The visitor's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of a product.
    ///
    /// Returns the ID of the line that now holds it. A line already at
    /// [`MAX_LINE_QUANTITY`] stays there.
    pub fn add(&mut self, product: &Product) -> LineId {
        if let Some(line) = self.lines.iter_mut().find(|l| l.stacks_with(product.id)) {
            line.quantity = line.quantity.saturating_add(1).min(MAX_LINE_QUANTITY);
            return line.id;
        }
        let line = CartLine::new(product, None);
        let id = line.id;
        self.lines.push(line);
        id
    }

    /// Append a workshop design of `product` as a new line.
    pub fn add_custom(&mut self, product: &Product, design: CustomDesign) -> LineId {
        let line = CartLine::new(product, Some(design));
        let id = line.id;
        self.lines.push(line);
        id
    }

    /// Remove a line. Returns whether a line was removed.
    pub fn remove(&mut self, id: LineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != id);
        self.lines.len() != before
    }

    /// Set the quantity of a line; zero removes it.
    ///
    /// Returns whether the line was changed. Quantities above
    /// [`MAX_LINE_QUANTITY`] are refused and leave the line as it was.
    pub fn set_quantity(&mut self, id: LineId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id);
        }
        if quantity > MAX_LINE_QUANTITY {
            return false;
        }
        match self.lines.iter_mut().find(|l| l.id == id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Cart lines in the order they were added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |total, l| total.saturating_add(l.quantity))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
