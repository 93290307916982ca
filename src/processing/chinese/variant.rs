/*!
 * Chinese written variants.
 */

use std::fmt;

use crate::language_utils::{Locale, language_codes_match};

/// A written variant of Chinese
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChineseVariant {
    /// Simplified characters (mainland China, Singapore)
    Simplified,
    /// Traditional characters with no regional standard
    Traditional,
    /// Traditional characters, Taiwan standard
    Taiwan,
    /// Traditional characters, Hong Kong standard
    HongKong,
}

impl ChineseVariant {
    /// Resolve the variant a locale denotes.
    ///
    /// An explicit `Hans` script always means Simplified. Otherwise the
    /// region picks the regional standard, and `Hant` with any other region
    /// is plain Traditional. Returns `None` for non-Chinese locales and for
    /// Chinese locales whose region is not a known variant and that carry
    /// no script.
    pub fn from_locale(locale: &Locale) -> Option<Self> {
        if !language_codes_match(locale.language(), "zh") {
            return None;
        }

        match (locale.script(), locale.region()) {
            (Some("Hans"), _) => Some(Self::Simplified),
            (Some("Hant"), Some("TW")) => Some(Self::Taiwan),
            (Some("Hant"), Some("HK") | Some("MO")) => Some(Self::HongKong),
            (Some("Hant"), _) => Some(Self::Traditional),
            (_, Some("CN") | Some("SG") | Some("MY")) => Some(Self::Simplified),
            (_, Some("TW")) => Some(Self::Taiwan),
            (_, Some("HK") | Some("MO")) => Some(Self::HongKong),
            (None, None) => Some(Self::Simplified),
            _ => None,
        }
    }

    /// Canonical locale tag of the variant
    pub fn language_tag(&self) -> &'static str {
        match self {
            Self::Simplified => "zh-CN",
            Self::Traditional => "zh-Hant",
            Self::Taiwan => "zh-TW",
            Self::HongKong => "zh-HK",
        }
    }

    /// Short name used in logs and metadata
    pub fn name(&self) -> &'static str {
        match self {
            Self::Simplified => "Simplified",
            Self::Traditional => "Traditional",
            Self::Taiwan => "Taiwan",
            Self::HongKong => "HongKong",
        }
    }
}

impl fmt::Display for ChineseVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An unordered pair of variants; `(a, b)` and `(b, a)` are the same key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantPair {
    first: ChineseVariant,
    second: ChineseVariant,
}

impl VariantPair {
    /// Create the pair for two variants in any order
    pub fn new(a: ChineseVariant, b: ChineseVariant) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// The smaller variant of the pair
    pub fn first(&self) -> ChineseVariant {
        self.first
    }

    /// The larger variant of the pair
    pub fn second(&self) -> ChineseVariant {
        self.second
    }

    /// Whether the pair contains `variant`
    pub fn contains(&self, variant: ChineseVariant) -> bool {
        self.first == variant || self.second == variant
    }
}

impl fmt::Display for VariantPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<->{}", self.first, self.second)
    }
}
