pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::catalog::{FallbackCatalog, RemoteCatalog, StaticCatalog};
pub use adapters::storage::LocalStorage;
pub use config::{toml_config::TomlConfig, FeedEndpoints};
pub use core::i18n::{LanguagePreference, Locale, Translator};
pub use core::loading::{LoadingController, LoadingOptions, NavigationLoading};
pub use core::prices::PriceService;
pub use domain::model::{FetchResult, Group, Label, PriceEntry, PriceMap, Product, Row};
pub use domain::ports::CatalogProvider;
pub use utils::error::{Result, StorefrontError};
