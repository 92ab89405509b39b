//! Product-line predicates over raw price-feed keys.

use regex::Regex;
use std::sync::LazyLock;

/// Predicate deciding whether a feed key belongs to a product line.
pub type Classifier = fn(&str) -> bool;

static CLASSIC_24K: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^KISA24\s+").expect("valid classic 24k pattern"));
static KISAGOLD_992: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)KISAGOLD\s*992%").expect("valid 99.2% pattern"));
static KISAGOLD_999: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)KISAGOLD\s*999%").expect("valid 99.9% pattern"));

/// Keys such as `KISA24 24K 25gr`.
pub fn is_classic_24k(key: &str) -> bool {
    CLASSIC_24K.is_match(key)
}

/// Keys such as `KISAGOLD 992% (Non Brand)`.
pub fn is_kisagold_992(key: &str) -> bool {
    KISAGOLD_992.is_match(key)
}

/// Keys such as `KISAGOLD 999% (KISA24) 100gr`.
pub fn is_kisagold_999(key: &str) -> bool {
    KISAGOLD_999.is_match(key)
}
