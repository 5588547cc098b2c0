//! Design workshop options and prompt building.
//!
//! A workshop design is free text plus a material, lace style and lace colour.
//! [`DesignPrompt::enriched`] folds the selections into the text that is sent
//! to the image model.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Heritage themes offered as one-click prompt additions.
pub const THEMES: [&str; 7] = [
    "Dhaka Patterns",
    "Himalayan Peaks",
    "One-Horned Rhinos",
    "Ilam Tea Gardens",
    "Rhododendron Blossoms",
    "Yeti Footprints",
    "Royal Bengal Tigers",
];

/// Define a closed set of workshop options, each with a form id and a display
/// name, plus `ALL`, `Display` (the name) and `FromStr` (the id).
macro_rules! workshop_option {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => ($id:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every option, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Form value.
            #[must_use]
            pub const fn id(&self) -> &'static str {
                match self {
                    $(Self::$variant => $id),+
                }
            }

            /// Display name, also used in prompts.
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|o| o.id() == s.trim())
                    .ok_or_else(|| ParseError::unknown($kind, s))
            }
        }
    };
}

workshop_option! {
    /// Upper material.
    Material, "material" {
        Leather => ("leather", "Premium Leather"),
        #[default]
        Mesh => ("mesh", "Technical Mesh"),
        Suede => ("suede", "Soft Suede"),
        Canvas => ("canvas", "Organic Canvas"),
    }
}

impl Material {
    /// Short description shown under the material picker.
    #[must_use]
    pub const fn tagline(&self) -> &'static str {
        match self {
            Self::Leather => "Durable & Classic",
            Self::Mesh => "Breathable & Light",
            Self::Suede => "Tactile & Stylish",
            Self::Canvas => "Natural & Rugged",
        }
    }
}

workshop_option! {
    LaceStyle, "lace style" {
        #[default]
        Flat => ("flat", "Classic Flat"),
        Round => ("round", "Sport Round"),
        Braided => ("braided", "Braided Rope"),
    }
}

workshop_option! {
    LaceColor, "lace color" {
        #[default]
        White => ("white", "Cloud White"),
        Crimson => ("crimson", "Rhododendron Crimson"),
        Sky => ("sky", "Himalayan Sky"),
        Gold => ("gold", "Temple Gold"),
        Forest => ("forest", "Deep Forest"),
        Obsidian => ("obsidian", "Obsidian Black"),
    }
}

impl LaceColor {
    /// Swatch colour for the picker.
    #[must_use]
    pub const fn hex(&self) -> &'static str {
        match self {
            Self::White => "#ffffff",
            Self::Crimson => "#e11d48",
            Self::Sky => "#38bdf8",
            Self::Gold => "#fbbf24",
            Self::Forest => "#065f46",
            Self::Obsidian => "#111827",
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Requested output resolution. Anything above 1K needs the pro model tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Resolution {
    #[default]
    #[serde(rename = "1K")]
    Standard,
    #[serde(rename = "2K")]
    High2K,
    #[serde(rename = "4K")]
    High4K,
}

impl Resolution {
    pub const ALL: [Self; 3] = [Self::Standard, Self::High2K, Self::High4K];

    /// Image size value understood by the image model.
    #[must_use]
    pub const fn image_size(&self) -> &'static str {
        match self {
            Self::Standard => "1K",
            Self::High2K => "2K",
            Self::High4K => "4K",
        }
    }

    /// Whether this resolution is served by the pro tier.
    #[must_use]
    pub const fn is_pro(&self) -> bool {
        !matches!(self, Self::Standard)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.image_size())
    }
}

impl FromStr for Resolution {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.image_size().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::unknown("resolution", s))
    }
}

// =============================================================================
// Prompt
// =============================================================================

/// Aspect ratio requested for every workshop render.
pub const ASPECT_RATIO: &str = "1:1";

/// A visitor's design brief.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignPrompt {
    pub prompt: String,
    pub material: Material,
    pub lace_style: LaceStyle,
    pub lace_color: LaceColor,
}

impl DesignPrompt {
    /// Whether there is anything to generate from.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.prompt.trim().is_empty()
    }

    /// Fold a theme into the free text.
    ///
    /// A theme already mentioned is left alone, an empty prompt becomes the
    /// theme, otherwise the theme is appended after a comma.
    pub fn add_theme(&mut self, theme: &str) {
        self.prompt = add_theme(&self.prompt, theme);
    }

    /// The free text with the structured selections folded in.
    #[must_use]
    pub fn enriched(&self) -> String {
        format!(
            "{}. The shoe features {} laces in a vibrant {} color, {} upper.",
            self.prompt.trim(),
            self.lace_style.name(),
            self.lace_color.name(),
            self.material.name(),
        )
    }
}

/// See [`DesignPrompt::add_theme`].
#[must_use]
pub fn add_theme(prompt: &str, theme: &str) -> String {
    let prompt = prompt.trim();
    if prompt.contains(theme) {
        prompt.to_owned()
    } else if prompt.is_empty() {
        theme.to_owned()
    } else {
        format!("{prompt}, {theme}")
    }
}
