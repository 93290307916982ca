/*!
 * Tests for language utility functions
 */

use textpipe::language_utils::{
    LanguageCodeType, Locale, get_language_name, language_codes_match, normalize_to_part2t, validate_language_code,
};

/// Test validation of language codes
#[test]
fn test_validate_language_code_withValidCodes_shouldReturnCorrectType() {
    assert_eq!(validate_language_code("en").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("zh").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("zho").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("chi").unwrap(), LanguageCodeType::Part2B);
    assert_eq!(validate_language_code(" EN ").unwrap(), LanguageCodeType::Part1);

    assert!(validate_language_code("xyz").is_err());
    assert!(validate_language_code("123").is_err());
    assert!(validate_language_code("e").is_err());
}

/// Test normalization of language codes to ISO 639-2/T format
#[test]
fn test_normalize_to_part2t_withValidCodes_shouldNormalizeCorrectly() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("zh").unwrap(), "zho");
    assert_eq!(normalize_to_part2t("chi").unwrap(), "zho");
    assert_eq!(normalize_to_part2t("FRE").unwrap(), "fra");
    assert!(normalize_to_part2t("qq").is_err());
}

/// Test matching of different language code formats
#[test]
fn test_language_codes_match_withMixedFormats_shouldMatch() {
    assert!(language_codes_match("zh", "zho"));
    assert!(language_codes_match("chi", "zh"));
    assert!(!language_codes_match("zh", "ja"));
    assert!(!language_codes_match("zh", "invalid"));
}

#[test]
fn test_get_language_name_withChinese_shouldReturnName() {
    assert_eq!(get_language_name("zh").unwrap(), "Chinese");
}

#[test]
fn test_locale_fromStr_withRegion_shouldRoundTripTag() {
    let locale: Locale = "zh_tw".parse().unwrap();
    assert_eq!(locale.to_language_tag(), "zh-TW");
    assert_eq!(locale.script(), None);
}

#[test]
fn test_locale_matches_withFilterSemantics_shouldCompareRegionOnlyWhenBothSet() {
    let filter = Locale::parse("zh").unwrap();
    assert!(filter.matches(&Locale::parse("zh-Hant-HK").unwrap()));

    let taiwan = Locale::parse("zh-TW").unwrap();
    assert!(taiwan.matches(&Locale::parse("zh-Hant-TW").unwrap()));
    assert!(!taiwan.matches(&Locale::parse("zh-HK").unwrap()));
    assert!(!taiwan.matches(&Locale::parse("en-TW").unwrap()));
}
