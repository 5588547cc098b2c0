//! The closed set of storefront pages.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// A storefront page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Home,
    Shop,
    Customize,
    Restoration,
    Cart,
    About,
    Contact,
    Faq,
    SizeChart,
    Returns,
    TrackOrder,
    Shipping,
}

impl Route {
    pub const ALL: [Self; 12] = [
        Self::Home,
        Self::Shop,
        Self::Customize,
        Self::Restoration,
        Self::Cart,
        Self::About,
        Self::Contact,
        Self::Faq,
        Self::SizeChart,
        Self::Returns,
        Self::TrackOrder,
        Self::Shipping,
    ];

    /// Main navigation entries.
    pub const PRIMARY: [Self; 4] = [Self::Home, Self::Shop, Self::Customize, Self::Restoration];

    /// Secondary navigation entries.
    pub const SECONDARY: [Self; 2] = [Self::About, Self::Contact];

    /// Footer help links.
    pub const HELP: [Self; 5] = [
        Self::Faq,
        Self::SizeChart,
        Self::Returns,
        Self::TrackOrder,
        Self::Shipping,
    ];

    /// URL-safe identifier, e.g. `size-chart`.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Shop => "shop",
            Self::Customize => "customize",
            Self::Restoration => "restoration",
            Self::Cart => "cart",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Faq => "faq",
            Self::SizeChart => "size-chart",
            Self::Returns => "returns",
            Self::TrackOrder => "track-order",
            Self::Shipping => "shipping",
        }
    }

    /// Request path the page is served at.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Shop => "/shop",
            Self::Customize => "/customize",
            Self::Restoration => "/restoration",
            Self::Cart => "/cart",
            Self::About => "/about",
            Self::Contact => "/contact",
            Self::Faq => "/faq",
            Self::SizeChart => "/size-chart",
            Self::Returns => "/returns",
            Self::TrackOrder => "/track-order",
            Self::Shipping => "/shipping",
        }
    }

    /// Navigation label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Shop => "Shop",
            Self::Customize => "Design",
            Self::Restoration => "Restore",
            Self::Cart => "Cart",
            Self::About => "About",
            Self::Contact => "Contact",
            Self::Faq => "FAQ",
            Self::SizeChart => "Size Chart",
            Self::Returns => "Returns",
            Self::TrackOrder => "Track Order",
            Self::Shipping => "Shipping",
        }
    }

    /// The page served at `path`, ignoring a trailing slash and query string.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|r| r.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Route {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.slug() == s)
            .ok_or_else(|| ParseError::unknown("route", s))
    }
}
