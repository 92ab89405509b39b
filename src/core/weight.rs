use regex::Regex;
use std::sync::LazyLock;

// ASCII digits only: a run of other numerals must not shadow the category label.
static WEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)\s*gr").expect("valid weight pattern"));

fn find_weight(text: &str) -> Option<String> {
    WEIGHT
        .captures(text)
        .map(|caps| format!("{} gr", &caps[1]))
}

/// Gram denomination of a feed entry, normalized to `"<n> gr"`.
///
/// The key is searched first and the category label second; the first
/// match wins.
pub fn extract_weight(key: &str, category: Option<&str>) -> Option<String> {
    find_weight(key).or_else(|| category.and_then(find_weight))
}

/// Gram count of a normalized weight label. Zero and out-of-range values yield `None`.
pub fn parse_grams(weight: &str) -> Option<u64> {
    let digits = weight.split_whitespace().next()?;
    digits.parse::<u64>().ok().filter(|grams| *grams > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_from_key() {
        assert_eq!(extract_weight("KISA24 25gr", None).as_deref(), Some("25 gr"));
        assert_eq!(
            extract_weight("KISAGOLD 999% (KISA24) 100 GR", Some("Physical 1 gr")).as_deref(),
            Some("100 gr")
        );
    }

    #[test]
    fn test_weight_falls_back_to_category() {
        assert_eq!(
            extract_weight("KISAGOLD 992% (Non Brand)", Some("Physical 1 gr")).as_deref(),
            Some("1 gr")
        );
    }

    #[test]
    fn test_non_ascii_digits_in_key_fall_back_to_category() {
        assert_eq!(
            extract_weight("KISAGOLD 992% \u{0665}gr", Some("Physical 1 gr")).as_deref(),
            Some("1 gr")
        );
        assert_eq!(extract_weight("KISA24 \u{0665}\u{0660}gr", None), None);
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(
            extract_weight("KISA24 5gr / 10gr bundle", None).as_deref(),
            Some("5 gr")
        );
    }

    #[test]
    fn test_no_weight_anywhere() {
        assert_eq!(extract_weight("KISAGOLD 992% (Non Brand)", Some("Physical")), None);
        assert_eq!(extract_weight("KISAGOLD 992% (Non Brand)", None), None);
    }

    #[test]
    fn test_parse_grams() {
        assert_eq!(parse_grams("25 gr"), Some(25));
        assert_eq!(parse_grams("007 gr"), Some(7));
        assert_eq!(parse_grams("0 gr"), None);
        assert_eq!(parse_grams("99999999999999999999999 gr"), None);
    }
}
