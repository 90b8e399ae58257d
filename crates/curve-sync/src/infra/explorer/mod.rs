//! Client for Etherscan compatible contract verification APIs.

use {
    crate::domain::{SourceFetching, source::SourceLookup},
    alloy::primitives::Address,
    anyhow::{Context, Result},
    reqwest::Client,
    url::Url,
};

mod dto;

pub struct Explorer {
    client: Client,
    url: Url,
    api_key: String,
    chain_id: Option<u64>,
}

impl Explorer {
    pub fn new(url: Url, api_key: String, chain_id: Option<u64>) -> Self {
        Self {
            client: Client::new(),
            url,
            api_key,
            chain_id,
        }
    }

    fn source_code_url(&self, address: Address) -> Url {
        let mut url = self.url.clone();
        {
            let mut query = url.query_pairs_mut();
            if let Some(chain_id) = self.chain_id {
                query.append_pair("chainid", &chain_id.to_string());
            }
            query
                .append_pair("module", "contract")
                .append_pair("action", "getsourcecode")
                .append_pair("address", &address.to_string())
                .append_pair("apikey", &self.api_key);
        }
        url
    }
}

#[async_trait::async_trait]
impl SourceFetching for Explorer {
    async fn fetch_source(&self, address: Address) -> Result<SourceLookup> {
        let body = self
            .client
            .get(self.source_code_url(address))
            .send()
            .await
            .context("source code request failed")?
            .error_for_status()?
            .text()
            .await
            .context("failed to read source code response")?;
        let response = dto::Response::parse(&body)?;
        tracing::debug!(
            status = %response.status,
            message = %response.message,
            "explorer response"
        );
        response.into_domain()
    }
}
