//! Catalog product types.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// How a product is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Finished shoes sold as-is.
    ReadyMade,
    /// Base shoe that is personalised in the design workshop.
    Customizable,
}

impl Category {
    /// Every category, in sidebar order.
    pub const ALL: [Self; 2] = [Self::ReadyMade, Self::Customizable];

    /// The kebab-case identifier used in URLs.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::ReadyMade => "ready-made",
            Self::Customizable => "customizable",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ReadyMade => "Ready Made",
            Self::Customizable => "Customizable",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = crate::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ready-made" => Ok(Self::ReadyMade),
            "customizable" => Ok(Self::Customizable),
            other => Err(crate::ParseError::unknown("category", other)),
        }
    }
}

/// A product in the catalog.
///
/// Products come from the fixture list and are never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: Price,
    /// Primary image URL.
    pub image: String,
    /// Alternate views.
    #[serde(default)]
    pub images: Vec<String>,
    pub description: String,
    pub category: Category,
    /// Tag set; order is display order only.
    pub tags: Vec<String>,
}

impl Product {
    /// Whether the product carries the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether the product is personalised in the design workshop.
    #[must_use]
    pub fn is_customizable(&self) -> bool {
        self.category == Category::Customizable
    }
}

/// A one-off design generated in the workshop and attached to a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDesign {
    /// The visitor's design prompt.
    pub prompt: String,
    /// Reference to the generated image (usually a `data:` URL).
    pub image_url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_slug() {
        for category in Category::ALL {
            assert_eq!(category.slug().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_rejects_unknown() {
        let err = "sandals".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category: sandals");
    }

    #[test]
    fn test_category_serde_kebab_case() {
        let json = serde_json::to_string(&Category::ReadyMade).unwrap();
        assert_eq!(json, "\"ready-made\"");
    }
}
