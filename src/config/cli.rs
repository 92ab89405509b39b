use crate::config::toml_config::{CatalogSource, TomlConfig};
use crate::config::FeedEndpoints;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "kisagold")]
#[command(about = "KISAGOLD storefront: live gold prices and product catalog")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "PRICE_API_URL")]
    pub price_feed_url: Option<String>,

    #[arg(long, global = true, env = "PRICE_UPDATE_API_URL")]
    pub update_feed_url: Option<String>,

    #[arg(long, global = true, value_enum)]
    pub catalog_source: Option<CatalogSource>,

    #[arg(long, global = true, env = "CATALOG_API_URL")]
    pub catalog_url: Option<String>,

    #[arg(long, global = true, help = "Catalog snapshot JSON file")]
    pub snapshot: Option<String>,

    #[arg(long, global = true, help = "Output language (ID or EN)")]
    pub lang: Option<String>,

    #[arg(long, global = true, help = "Directory for saved preferences")]
    pub data_dir: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the live gold price board
    Prices {
        #[arg(long, help = "Write the result as JSON to this file")]
        output: Option<String>,

        #[arg(long, help = "Print a table instead of JSON")]
        table: bool,
    },
    /// List catalog products
    Products {
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        sub_category: Option<String>,

        #[arg(long, help = "Only featured products, at most N")]
        featured: Option<usize>,

        #[arg(long)]
        search: Option<String>,
    },
    /// Show one product
    Product {
        id: u64,

        #[arg(long, help = "Also list up to N recommended products")]
        recommended: Option<usize>,
    },
    /// Print the WhatsApp contact link
    Contact {
        message: Vec<String>,
    },
    /// Show or change the saved language
    Language {
        code: Option<String>,
    },
}

impl CliConfig {
    /// Config file settings with command-line and environment overrides applied.
    pub fn settings(&self) -> Result<TomlConfig> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if self.price_feed_url.is_some() || self.update_feed_url.is_some() {
            let current = settings
                .feeds
                .take()
                .unwrap_or_else(|| FeedEndpoints::new("", ""));
            settings.feeds = Some(FeedEndpoints {
                price_feed_url: self.price_feed_url.clone().unwrap_or(current.price_feed_url),
                update_feed_url: self
                    .update_feed_url
                    .clone()
                    .unwrap_or(current.update_feed_url),
            });
        }
        if let Some(source) = self.catalog_source {
            settings.catalog.source = source;
        }
        if let Some(url) = &self.catalog_url {
            settings.catalog.api_base_url = Some(url.clone());
        }
        if let Some(path) = &self.snapshot {
            settings.catalog.snapshot_path = Some(path.clone());
        }
        if let Some(dir) = &self.data_dir {
            settings.language.data_dir = dir.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::StorefrontError;

    #[test]
    fn test_parse_prices_command() {
        let cli = CliConfig::try_parse_from([
            "kisagold",
            "prices",
            "--table",
            "--price-feed-url",
            "https://feed.example.com/comparison-data",
            "--update-feed-url",
            "https://feed.example.com/last-update",
        ])
        .unwrap();

        assert!(matches!(cli.command, Command::Prices { table: true, .. }));
        let settings = cli.settings().unwrap();
        assert_eq!(
            settings.feed_endpoints().unwrap().price_feed_url,
            "https://feed.example.com/comparison-data"
        );
    }

    #[test]
    fn test_partial_feed_override_is_rejected() {
        let mut cli = CliConfig::try_parse_from([
            "kisagold",
            "--price-feed-url",
            "https://feed.example.com/comparison-data",
            "prices",
        ])
        .unwrap();
        // PRICE_UPDATE_API_URL may be set in the environment
        cli.update_feed_url = None;

        let err = cli.settings().unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::InvalidConfigValueError { ref field, .. } if field == "feeds.update_feed_url"
        ));
    }

    #[test]
    fn test_catalog_overrides() {
        let mut cli = CliConfig::try_parse_from([
            "kisagold",
            "products",
            "--catalog-source",
            "remote",
            "--catalog-url",
            "https://api.example.com",
            "--featured",
            "4",
        ])
        .unwrap();
        cli.price_feed_url = None;
        cli.update_feed_url = None;

        let settings = cli.settings().unwrap();
        assert_eq!(settings.catalog.source, CatalogSource::Remote);
        assert!(matches!(cli.command, Command::Products { featured: Some(4), .. }));
    }

    #[test]
    fn test_remote_catalog_without_url_fails() {
        let mut cli =
            CliConfig::try_parse_from(["kisagold", "products", "--catalog-source", "remote"])
                .unwrap();
        cli.price_feed_url = None;
        cli.update_feed_url = None;
        cli.catalog_url = None;

        let err = cli.settings().unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::MissingConfigError { ref field } if field == "catalog.api_base_url"
        ));
    }
}
