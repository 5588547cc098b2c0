//! Shoe restoration pricing.
//!
//! A quote is the condition's base cost plus the selected services, with a
//! bundle discount of 10% off the service sum once three or more services are
//! selected. Basic cleaning is always selected, costs nothing, and counts
//! towards the three.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;
use crate::types::Price;

/// Number of selected services at which the bundle discount applies.
pub const BUNDLE_THRESHOLD: usize = 3;

/// Bundle discount, as a percentage of the service sum.
pub const BUNDLE_DISCOUNT_PERCENT: u32 = 10;

// =============================================================================
// Condition
// =============================================================================

/// How worn the shoe is. Sets the base cost and turnaround.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    Light,
    Medium,
    Heavy,
    Damage,
}

impl Condition {
    pub const ALL: [Self; 4] = [Self::Light, Self::Medium, Self::Heavy, Self::Damage];

    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
            Self::Damage => "damage",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Light => "Light Dirt",
            Self::Medium => "Medium Dirt",
            Self::Heavy => "Heavy Dirt",
            Self::Damage => "Damage",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Light => "Small stains",
            Self::Medium => "Visible stains + dust",
            Self::Heavy => "Mud, deep stains, odor",
            Self::Damage => "Torn fabric, loose sole",
        }
    }

    /// Base cost in rupees.
    #[must_use]
    pub fn base_cost(&self) -> Price {
        Price::npr(match self {
            Self::Light => 299,
            Self::Medium => 499,
            Self::Heavy => 799,
            Self::Damage => 999,
        })
    }

    /// Estimated turnaround, e.g. `2-3 days`.
    #[must_use]
    pub const fn turnaround(&self) -> &'static str {
        match self {
            Self::Light => "1-2 days",
            Self::Medium => "2-3 days",
            Self::Heavy => "3-5 days",
            Self::Damage => "5-7 days",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Condition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.id() == s.trim())
            .ok_or_else(|| ParseError::unknown("condition", s))
    }
}

// =============================================================================
// Service
// =============================================================================

/// A restoration service add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Basic,
    Deep,
    Stain,
    Lace,
    White,
    Glue,
}

impl Service {
    /// Every service, in display order.
    pub const ALL: [Self; 6] = [
        Self::Basic,
        Self::Deep,
        Self::Stain,
        Self::Lace,
        Self::White,
        Self::Glue,
    ];

    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Deep => "deep",
            Self::Stain => "stain",
            Self::Lace => "lace",
            Self::White => "white",
            Self::Glue => "glue",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Basic => "Basic Cleaning",
            Self::Deep => "Deep Cleaning + Deodorize",
            Self::Stain => "Stain Removal",
            Self::Lace => "Lace Replacement",
            Self::White => "Sole Whitening",
            Self::Glue => "Minor Glue Repair",
        }
    }

    #[must_use]
    pub fn cost(&self) -> Price {
        Price::npr(match self {
            Self::Basic => 0,
            Self::Deep => 250,
            Self::Stain | Self::White => 200,
            Self::Lace => 150,
            Self::Glue => 300,
        })
    }

    /// Basic cleaning is part of every restoration.
    #[must_use]
    pub const fn is_mandatory(&self) -> bool {
        matches!(self, Self::Basic)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Service {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|svc| svc.id() == s.trim())
            .ok_or_else(|| ParseError::unknown("service", s))
    }
}

// =============================================================================
// Shoe details
// =============================================================================

/// Kid sizes offered on the estimate form, in years of age.
pub const KID_SIZES: core::ops::RangeInclusive<u8> = 1..=10;

/// Kind of shoe sent in for restoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShoeType {
    #[default]
    Sneakers,
    Sandals,
    SchoolShoes,
    Boots,
}

impl ShoeType {
    pub const ALL: [Self; 4] = [Self::Sneakers, Self::Sandals, Self::SchoolShoes, Self::Boots];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sneakers => "Sneakers",
            Self::Sandals => "Sandals",
            Self::SchoolShoes => "School Shoes",
            Self::Boots => "Boots",
        }
    }
}

impl fmt::Display for ShoeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShoeType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.label() == s.trim())
            .ok_or_else(|| ParseError::unknown("shoe type", s))
    }
}

// =============================================================================
// Selection
// =============================================================================

/// The set of selected services. Always contains the mandatory ones.
///
/// Iteration follows [`Service::ALL`] order regardless of selection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSelection {
    selected: Vec<Service>,
}

impl Default for ServiceSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceSelection {
    /// A selection holding only the mandatory services.
    #[must_use]
    pub fn new() -> Self {
        Self {
            selected: Service::ALL.into_iter().filter(Service::is_mandatory).collect(),
        }
    }

    /// Select the given services on top of the mandatory ones.
    #[must_use]
    pub fn with(services: impl IntoIterator<Item = Service>) -> Self {
        let mut selection = Self::new();
        for service in services {
            selection.insert(service);
        }
        selection
    }

    /// Select the service if absent, deselect it if present.
    ///
    /// Mandatory services stay selected.
    pub fn toggle(&mut self, service: Service) {
        if service.is_mandatory() {
            return;
        }
        if self.contains(service) {
            self.selected.retain(|s| *s != service);
        } else {
            self.insert(service);
        }
    }

    fn insert(&mut self, service: Service) {
        if !self.contains(service) {
            self.selected.push(service);
            self.selected
                .sort_by_key(|s| Service::ALL.iter().position(|a| a == s));
        }
    }

    #[must_use]
    pub fn contains(&self, service: Service) -> bool {
        self.selected.contains(&service)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Never true: the mandatory services are always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Service> + '_ {
        self.selected.iter().copied()
    }
}

// =============================================================================
// Estimate
// =============================================================================

/// A computed restoration quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestorationEstimate {
    pub condition: Condition,
    pub services: Vec<Service>,
    pub base: Price,
    pub addon_total: Price,
    pub discount: Price,
    pub total: Price,
    pub turnaround: &'static str,
}

impl RestorationEstimate {
    /// Whether the bundle discount was applied.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.discount > Price::ZERO
    }
}

/// Quote a restoration.
#[must_use]
pub fn estimate(condition: Condition, selection: &ServiceSelection) -> RestorationEstimate {
    let base = condition.base_cost();
    let addon_total: Price = selection.iter().map(|s| s.cost()).sum();
    let discount = if selection.len() >= BUNDLE_THRESHOLD {
        addon_total.percent(BUNDLE_DISCOUNT_PERCENT)
    } else {
        Price::ZERO
    };

    RestorationEstimate {
        condition,
        services: selection.iter().collect(),
        base,
        addon_total,
        discount,
        total: base + addon_total - discount,
        turnaround: condition.turnaround(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_example() {
        let selection = ServiceSelection::with([Service::Deep, Service::Stain, Service::Lace]);
        let quote = estimate(Condition::Medium, &selection);

        assert_eq!(quote.base, Price::npr(499));
        assert_eq!(quote.addon_total, Price::npr(600));
        assert_eq!(quote.discount, Price::npr(60));
        assert_eq!(quote.total, Price::npr(1039));
        assert_eq!(quote.turnaround, "2-3 days");
    }

    #[test]
    fn test_basic_only_is_base_cost() {
        for condition in Condition::ALL {
            let quote = estimate(condition, &ServiceSelection::new());
            assert_eq!(quote.total, condition.base_cost());
            assert!(!quote.has_discount());
        }
    }

    #[test]
    fn test_basic_counts_towards_threshold() {
        // basic + deep = 2 services, no discount
        let two = ServiceSelection::with([Service::Deep]);
        assert_eq!(estimate(Condition::Light, &two).total, Price::npr(549));

        // basic + deep + glue = 3 services, 10% off 550
        let three = ServiceSelection::with([Service::Deep, Service::Glue]);
        let quote = estimate(Condition::Light, &three);
        assert_eq!(quote.discount, Price::npr(55));
        assert_eq!(quote.total, Price::npr(794));
    }

    #[test]
    fn test_discount_applies_to_addons_only() {
        let selection = ServiceSelection::with([Service::Lace, Service::Deep]);
        let quote = estimate(Condition::Damage, &selection);
        assert_eq!(quote.discount, Price::npr(40));
        assert_eq!(quote.total, Price::npr(999 + 400 - 40));
        assert_eq!(quote.total.display(), "NPR 1,359");
    }

    #[test]
    fn test_all_services() {
        let selection = ServiceSelection::with(Service::ALL);
        let quote = estimate(Condition::Damage, &selection);
        assert_eq!(quote.services.len(), 6);
        assert_eq!(quote.addon_total, Price::npr(1100));
        assert_eq!(quote.total, Price::npr(999 + 1100 - 110));
    }

    #[test]
    fn test_toggle_keeps_basic() {
        let mut selection = ServiceSelection::new();
        selection.toggle(Service::Basic);
        assert!(selection.contains(Service::Basic));
        assert_eq!(selection.len(), 1);
        assert!(!selection.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut selection = ServiceSelection::with([Service::White]);
        let before = selection.clone();
        selection.toggle(Service::Glue);
        assert!(selection.contains(Service::Glue));
        selection.toggle(Service::Glue);
        assert_eq!(selection, before);
    }

    #[test]
    fn test_selection_iterates_in_display_order() {
        let selection = ServiceSelection::with([Service::Glue, Service::Deep, Service::Glue]);
        let ids: Vec<_> = selection.iter().map(|s| s.id()).collect();
        assert_eq!(ids, ["basic", "deep", "glue"]);
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!("heavy".parse::<Condition>().unwrap(), Condition::Heavy);
        assert_eq!("white".parse::<Service>().unwrap(), Service::White);
        assert_eq!(
            "soaked".parse::<Condition>(),
            Err(ParseError::unknown("condition", "soaked"))
        );
        assert!("".parse::<Service>().is_err());
        assert_eq!("School Shoes".parse::<ShoeType>().unwrap(), ShoeType::SchoolShoes);
        assert!("Slippers".parse::<ShoeType>().is_err());
    }

    #[test]
    fn test_ids_round_trip_through_display() {
        for condition in Condition::ALL {
            assert_eq!(condition.to_string().parse::<Condition>().unwrap(), condition);
        }
        for service in Service::ALL {
            assert_eq!(service.to_string().parse::<Service>().unwrap(), service);
        }
    }
}
