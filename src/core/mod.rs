pub mod classifier;
pub mod contact;
pub mod groups;
pub mod i18n;
pub mod loading;
pub mod prices;
pub mod rows;
pub mod weight;

pub use crate::domain::model::{FetchResult, Group, PriceEntry, PriceMap, Row};
pub use crate::domain::ports::{CatalogProvider, ConfigProvider, Storage};
pub use crate::utils::error::Result;
