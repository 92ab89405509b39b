#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use serde::{Deserialize, Serialize};

/// Where the two live price feeds are served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEndpoints {
    pub price_feed_url: String,
    pub update_feed_url: String,
}

impl FeedEndpoints {
    pub fn new(price_feed_url: impl Into<String>, update_feed_url: impl Into<String>) -> Self {
        Self {
            price_feed_url: price_feed_url.into(),
            update_feed_url: update_feed_url.into(),
        }
    }
}

impl ConfigProvider for FeedEndpoints {
    fn price_feed_url(&self) -> &str {
        &self.price_feed_url
    }

    fn update_feed_url(&self) -> &str {
        &self.update_feed_url
    }
}

impl Validate for FeedEndpoints {
    fn validate(&self) -> Result<()> {
        validate_url("feeds.price_feed_url", &self.price_feed_url)?;
        validate_url("feeds.update_feed_url", &self.update_feed_url)?;
        Ok(())
    }
}
