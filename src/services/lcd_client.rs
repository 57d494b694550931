use crate::models::{
    DelegationResponse, DelegationsResponse, Pagination, RewardRecord, RewardsResponse, Validator,
    ValidatorsResponse,
};
use async_trait::async_trait;
use log::{info, warn};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Request { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

/// Read-only view of the chain's staking state.
#[async_trait]
pub trait StakingSource: Send + Sync {
    async fn fetch_validators(&self) -> Result<Vec<Validator>, FetchError>;

    async fn fetch_delegations(&self, address: &str)
        -> Result<Vec<DelegationResponse>, FetchError>;

    /// Every returned record carries `address` as its delegator.
    async fn fetch_rewards(&self, address: &str) -> Result<Vec<RewardRecord>, FetchError>;
}

pub struct LcdClient {
    client: reqwest::Client,
    endpoint: String,
    page_limit: u32,
}

impl LcdClient {
    pub fn new(endpoint: &str, page_limit: u32) -> Self {
        info!("Using LCD endpoint {}", endpoint);
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            page_limit,
        }
    }

    fn validators_url(&self) -> String {
        format!(
            "{}/cosmos/staking/v1beta1/validators?pagination.limit={}",
            self.endpoint, self.page_limit
        )
    }

    fn delegations_url(&self, address: &str) -> String {
        format!(
            "{}/cosmos/staking/v1beta1/delegations/{}?pagination.limit={}",
            self.endpoint, address, self.page_limit
        )
    }

    fn rewards_url(&self, address: &str) -> String {
        format!(
            "{}/cosmos/distribution/v1beta1/delegators/{}/rewards",
            self.endpoint, address
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        info!("Fetching {}", url);
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(source) => return Err(FetchError::Request { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => return Err(FetchError::Request { url, source }),
        };
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { url, source })
    }
}

fn warn_if_truncated(pagination: Option<&Pagination>, what: &str, limit: u32) {
    if let Some(pagination) = pagination.filter(|p| p.is_truncated()) {
        warn!(
            "{} exceed one page of {} (server total: {}); the rest is not included",
            what,
            limit,
            pagination.reported_total().unwrap_or("unknown")
        );
    }
}

#[async_trait]
impl StakingSource for LcdClient {
    async fn fetch_validators(&self) -> Result<Vec<Validator>, FetchError> {
        let response: ValidatorsResponse = self.get_json(self.validators_url()).await?;
        warn_if_truncated(response.pagination.as_ref(), "Validators", self.page_limit);
        info!("Fetched {} validators", response.validators.len());
        Ok(response.validators)
    }

    async fn fetch_delegations(
        &self,
        address: &str,
    ) -> Result<Vec<DelegationResponse>, FetchError> {
        let response: DelegationsResponse = self.get_json(self.delegations_url(address)).await?;
        warn_if_truncated(
            response.pagination.as_ref(),
            &format!("Delegations of {}", address),
            self.page_limit,
        );
        info!(
            "Fetched {} delegations for {}",
            response.delegation_responses.len(),
            address
        );
        Ok(response.delegation_responses)
    }

    async fn fetch_rewards(&self, address: &str) -> Result<Vec<RewardRecord>, FetchError> {
        let response: RewardsResponse = self.get_json(self.rewards_url(address)).await?;
        info!(
            "Fetched rewards from {} validators for {}",
            response.rewards.len(),
            address
        );
        Ok(response
            .rewards
            .into_iter()
            .map(|reward| RewardRecord::stamped(address, reward))
            .collect())
    }
}
