use crate::core::Storage;
use crate::utils::error::{Result, StorefrontError};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Storage entry holding the visitor's chosen language.
pub const LANGUAGE_PREFERENCE_KEY: &str = "kisagold-language";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Id,
    En,
}

impl Locale {
    pub const FALLBACK: Locale = Locale::En;

    pub fn code(self) -> &'static str {
        match self {
            Locale::Id => "id",
            Locale::En => "en",
        }
    }

    /// Upper-case code used in the language switcher.
    pub fn display_code(self) -> &'static str {
        match self {
            Locale::Id => "ID",
            Locale::En => "EN",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Locale::Id => "Indonesia",
            Locale::En => "English",
        }
    }

    pub fn available() -> [Locale; 2] {
        [Locale::Id, Locale::En]
    }
}

impl FromStr for Locale {
    type Err = StorefrontError;

    fn from_str(code: &str) -> Result<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Locale::Id),
            "en" => Ok(Locale::En),
            _ => Err(StorefrontError::UnsupportedLocale {
                code: code.to_string(),
            }),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Language choice persisted through a [`Storage`] backend.
pub struct LanguagePreference<S: Storage> {
    storage: S,
}

impl<S: Storage> LanguagePreference<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Locale saved by an earlier [`LanguagePreference::change`], if any is readable.
    pub async fn saved(&self) -> Option<Locale> {
        let bytes = self.storage.read_file(LANGUAGE_PREFERENCE_KEY).await.ok()?;
        String::from_utf8_lossy(&bytes).parse().ok()
    }

    /// Saved locale, or Indonesian when nothing usable was saved.
    pub async fn load(&self) -> Locale {
        self.saved().await.unwrap_or_default()
    }

    pub async fn change(&self, code: &str) -> Result<Locale> {
        let locale: Locale = code.parse()?;
        self.storage
            .write_file(LANGUAGE_PREFERENCE_KEY, locale.code().as_bytes())
            .await?;
        tracing::info!("Language changed to: {}", locale.display_code());
        Ok(locale)
    }
}

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("valid placeholder pattern"));

/// Message catalogs keyed by locale.
///
/// Lookups use dotted paths into nested JSON objects (`price.lastUpdate`).
/// A key missing from the requested locale is looked up in English, and a
/// key missing everywhere is returned as-is.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    catalogs: HashMap<Locale, Value>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalogs shipped with the crate.
    pub fn bundled() -> Result<Self> {
        let mut translator = Self::new();
        translator.add_catalog_str(Locale::Id, include_str!("../../locales/id.json"))?;
        translator.add_catalog_str(Locale::En, include_str!("../../locales/en.json"))?;
        Ok(translator)
    }

    pub fn add_catalog_str(&mut self, locale: Locale, json: &str) -> Result<()> {
        let catalog: Value = serde_json::from_str(json)?;
        self.catalogs.insert(locale, catalog);
        Ok(())
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        let mut node = self.catalogs.get(&locale)?;
        for part in key.split('.') {
            node = node.get(part)?;
        }
        node.as_str()
    }

    pub fn translate(&self, locale: Locale, key: &str, params: &[(&str, &str)]) -> String {
        let message = self
            .lookup(locale, key)
            .or_else(|| self.lookup(Locale::FALLBACK, key))
            .unwrap_or(key);

        if params.is_empty() {
            return message.to_string();
        }

        PLACEHOLDER
            .replace_all(message, |caps: &Captures| {
                params
                    .iter()
                    .find(|(name, _)| *name == &caps[1])
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}
