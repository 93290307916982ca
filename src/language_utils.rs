/*!
 * Language utilities and the `Locale` value type.
 *
 * This module provides functions for validating, normalizing, and
 * matching ISO 639-1 (2-letter) and ISO 639-2 (3-letter) language codes,
 * and the `Locale` type (language plus optional script and region) used
 * for stage applicability filtering.
 */

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;
use regex::Regex;

/// Language tag syntax: `language[-Script][-REGION]`, `_` accepted as separator
static LANGUAGE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]{2,3})(?:[-_]([A-Za-z]{4}))?(?:[-_]([A-Za-z]{2}|[0-9]{3}))?$").unwrap()
});

/// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    PART2B_TO_PART2T
        .iter()
        .find(|(b, _)| *b == code)
        .map(|(_, t)| *t)
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    match normalized_code.len() {
        2 if Language::from_639_1(&normalized_code).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&normalized_code).is_some() => Ok(LanguageCodeType::Part2T),
        3 if part2b_to_part2t(&normalized_code).is_some() => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    match validate_language_code(&normalized_code) {
        Ok(LanguageCodeType::Part1) => Language::from_639_1(&normalized_code)
            .map(|lang| lang.to_639_3().to_string())
            .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code)),
        Ok(LanguageCodeType::Part2T) => Ok(normalized_code),
        Ok(LanguageCodeType::Part2B) => part2b_to_part2t(&normalized_code)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code)),
        Err(_) => Err(anyhow!("Cannot normalize invalid language code: {}", code)),
    }
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(normalized1), Ok(normalized2)) => normalized1 == normalized2,
        _ => false,
    }
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// A language identity with optional script and region.
///
/// Locales are immutable values created from configuration or caller
/// input. Equality is structural; use [`Locale::matches`] for the looser
/// comparison applied by locale filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    script: Option<String>,
    region: Option<String>,
}

impl Locale {
    /// Create a locale from a language code alone
    pub fn new(language: &str) -> Result<Self> {
        Self::with_parts(language, None, None)
    }

    /// Create a locale from its parts; the language code is validated
    pub fn with_parts(language: &str, script: Option<&str>, region: Option<&str>) -> Result<Self> {
        let language = language.trim().to_lowercase();
        validate_language_code(&language)?;

        Ok(Self {
            language,
            script: script.map(title_case),
            region: region.map(|r| r.trim().to_uppercase()),
        })
    }

    /// Parse a language tag such as `en`, `zh-TW`, `zh_Hant_HK` or `es-419`
    pub fn parse(tag: &str) -> Result<Self> {
        let captures = LANGUAGE_TAG_REGEX
            .captures(tag.trim())
            .ok_or_else(|| anyhow!("Invalid language tag: {}", tag))?;

        Self::with_parts(
            &captures[1],
            captures.get(2).map(|m| m.as_str()),
            captures.get(3).map(|m| m.as_str()),
        )
    }

    /// Language code as written (lower-cased)
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Optional 4-letter script, title-cased
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// Optional region, upper-cased
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Whether this locale and `other` name the same language, ignoring code format
    pub fn same_language(&self, other: &Locale) -> bool {
        self.language == other.language || language_codes_match(&self.language, &other.language)
    }

    /// Filter comparison: same language, and same region when both specify one
    pub fn matches(&self, other: &Locale) -> bool {
        if !self.same_language(other) {
            return false;
        }

        match (&self.region, &other.region) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }

    /// Canonical tag, e.g. `zh-Hant-TW`
    pub fn to_language_tag(&self) -> String {
        let mut tag = self.language.clone();
        if let Some(script) = &self.script {
            tag.push('-');
            tag.push_str(script);
        }
        if let Some(region) = &self.region {
            tag.push('-');
            tag.push_str(region);
        }
        tag
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_language_tag())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn title_case(script: &str) -> String {
    let lower = script.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
