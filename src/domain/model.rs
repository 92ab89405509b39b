use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::core::i18n::Locale;

/// One priced item from the live feed, keyed externally by its feed key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    #[serde(default)]
    pub buy_price: Option<f64>,
    #[serde(default)]
    pub buyback_price: Option<f64>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub categories: Option<String>,
}

/// Category labels that are not strings are treated as absent.
fn text_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

/// Feed entries in the order the feed listed them.
///
/// Values that are not shaped like a [`PriceEntry`] are dropped while
/// decoding; the rest of the map is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceMap {
    entries: Vec<(String, PriceEntry)>,
}

impl PriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: PriceEntry) {
        self.entries.push((key.into(), entry));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PriceEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_json_map(map: Map<String, Value>) -> Self {
        let entries = map
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value::<PriceEntry>(value) {
                Ok(entry) => Some((key, entry)),
                Err(e) => {
                    tracing::trace!("Dropping malformed price entry '{}': {}", key, e);
                    None
                }
            })
            .collect();
        Self { entries }
    }
}

impl<K: Into<String>> FromIterator<(K, PriceEntry)> for PriceMap {
    fn from_iter<I: IntoIterator<Item = (K, PriceEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, e)| (k.into(), e)).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for PriceMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Option::<Map<String, Value>>::deserialize(deserializer)?;
        Ok(map.map(Self::from_json_map).unwrap_or_default())
    }
}

/// Body of the current-price feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonPayload {
    #[serde(default)]
    pub price_data: PriceMap,
}

/// Body of the last-update feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePayload {
    #[serde(default)]
    pub value: Option<Value>,
}

impl UpdatePayload {
    pub fn last_update(&self) -> Option<String> {
        match &self.value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub en: String,
    pub id: String,
}

impl Label {
    pub fn new(en: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            id: id.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Id => &self.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub weight: String,
    pub buy_price: f64,
    pub buyback_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub category_id: String,
    pub label: Label,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    pub groups: Vec<Group>,
    pub last_update: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub id: String,
    pub parent_category_id: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub category_id: String,
    #[serde(default)]
    pub sub_category_id: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Full static catalog as stored in a snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
    #[serde(default)]
    pub products: Vec<Product>,
}
