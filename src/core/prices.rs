use crate::core::groups::{assemble_groups, default_group_definitions, GroupDefinition};
use crate::core::ConfigProvider;
use crate::domain::model::{ComparisonPayload, FetchResult, UpdatePayload};
use crate::utils::error::{Result, StorefrontError};
use reqwest::Client;

/// Fetches the live price board.
///
/// Every call hits both feeds again; nothing is cached between calls.
pub struct PriceService<C: ConfigProvider> {
    config: C,
    client: Client,
    definitions: Vec<GroupDefinition>,
}

impl<C: ConfigProvider> PriceService<C> {
    pub fn new(config: C) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: C, client: Client) -> Self {
        Self {
            config,
            client,
            definitions: default_group_definitions(),
        }
    }

    pub fn with_definitions(mut self, definitions: Vec<GroupDefinition>) -> Self {
        self.definitions = definitions;
        self
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub async fn fetch_price_data(&self) -> Result<FetchResult> {
        let price_url = self.config.price_feed_url();
        let update_url = self.config.update_feed_url();

        tracing::debug!("Requesting price feed: {}", price_url);
        tracing::debug!("Requesting last-update feed: {}", update_url);

        let (price_res, update_res) = tokio::try_join!(
            self.client.get(price_url).send(),
            self.client.get(update_url).send()
        )?;

        let (price_status, update_status) = (price_res.status(), update_res.status());
        tracing::debug!(
            "Feed response status: price={}, update={}",
            price_status,
            update_status
        );

        if !price_status.is_success() || !update_status.is_success() {
            return Err(StorefrontError::PriceApiError {
                price_status: price_status.as_u16(),
                update_status: update_status.as_u16(),
            });
        }

        let (comparison, update) = tokio::try_join!(
            price_res.json::<ComparisonPayload>(),
            update_res.json::<UpdatePayload>()
        )?;

        let groups = assemble_groups(&comparison.price_data, &self.definitions);
        tracing::info!(
            "Assembled {} price group(s) from {} feed entries",
            groups.len(),
            comparison.price_data.len()
        );

        Ok(FetchResult {
            groups,
            last_update: update.last_update(),
        })
    }
}
