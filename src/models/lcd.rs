//! Payloads returned by the Cosmos SDK LCD endpoints. Fields the report does
//! not use are left out and ignored on decode.

use super::Amount;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Amount,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub next_key: Option<String>,
    #[serde(default)]
    pub total: Option<String>,
}

impl Pagination {
    /// True when the server holds more results than it returned.
    pub fn is_truncated(&self) -> bool {
        self.next_key
            .as_deref()
            .map(|key| !key.is_empty())
            .unwrap_or(false)
    }

    /// Server-side result count. The LCD answers "0" unless `count_total`
    /// was requested, so that value means unknown.
    pub fn reported_total(&self) -> Option<&str> {
        self.total.as_deref().filter(|total| *total != "0")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Description {
    #[serde(default)]
    pub moniker: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Validator {
    pub operator_address: String,
    pub status: String,
    #[serde(default)]
    pub description: Description,
}

#[derive(Debug, Deserialize)]
pub struct ValidatorsResponse {
    pub validators: Vec<Validator>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Delegation {
    pub delegator_address: String,
    pub validator_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DelegationResponse {
    pub delegation: Delegation,
    pub balance: Coin,
}

#[derive(Debug, Deserialize)]
pub struct DelegationsResponse {
    pub delegation_responses: Vec<DelegationResponse>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Rewards for one validator as served by the distribution module. The
/// delegator is implied by the queried path.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidatorReward {
    pub validator_address: String,
    #[serde(default)]
    pub reward: Vec<Coin>,
}

#[derive(Debug, Deserialize)]
pub struct RewardsResponse {
    #[serde(default)]
    pub rewards: Vec<ValidatorReward>,
}

#[derive(Debug, Clone)]
pub struct RewardRecord {
    pub delegator_address: String,
    pub validator_address: String,
    pub reward: Vec<Coin>,
}

impl RewardRecord {
    pub fn stamped(delegator_address: &str, reward: ValidatorReward) -> Self {
        Self {
            delegator_address: delegator_address.to_string(),
            validator_address: reward.validator_address,
            reward: reward.reward,
        }
    }

    /// The first entry in `denom`, if any.
    pub fn amount_in(&self, denom: &str) -> Option<&Amount> {
        self.reward
            .iter()
            .find(|coin| coin.denom == denom)
            .map(|coin| &coin.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_validator_listing() {
        let raw = r#"{
            "validators": [{
                "operator_address": "bitsongvaloper1abc",
                "consensus_pubkey": {"@type": "/cosmos.crypto.ed25519.PubKey", "key": "x"},
                "jailed": false,
                "status": "BOND_STATUS_BONDED",
                "tokens": "1000",
                "delegator_shares": "1000.000000000000000000",
                "description": {"moniker": "Val A", "identity": "", "website": ""},
                "commission": {"commission_rates": {"rate": "0.05"}}
            }],
            "pagination": {"next_key": null, "total": "1"}
        }"#;
        let response: ValidatorsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.validators.len(), 1);
        assert_eq!(response.validators[0].description.moniker, "Val A");
        assert!(!response.pagination.unwrap().is_truncated());
    }

    #[test]
    fn detects_truncated_page() {
        let raw = r#"{"delegation_responses": [], "pagination": {"next_key": "FPx0", "total": "0"}}"#;
        let response: DelegationsResponse = serde_json::from_str(raw).unwrap();
        assert!(response.pagination.unwrap().is_truncated());
    }

    #[test]
    fn zero_total_is_unknown() {
        let uncounted: Pagination =
            serde_json::from_str(r#"{"next_key": "FPx0", "total": "0"}"#).unwrap();
        assert_eq!(uncounted.reported_total(), None);

        let counted: Pagination =
            serde_json::from_str(r#"{"next_key": "FPx0", "total": "2345"}"#).unwrap();
        assert_eq!(counted.reported_total(), Some("2345"));

        let missing: Pagination = serde_json::from_str(r#"{"next_key": null}"#).unwrap();
        assert_eq!(missing.reported_total(), None);
    }

    #[test]
    fn decodes_rewards_and_picks_denom() {
        let raw = r#"{
            "rewards": [{
                "validator_address": "bitsongvaloper1abc",
                "reward": [
                    {"denom": "ibc/ABC", "amount": "7.000000000000000000"},
                    {"denom": "ubtsg", "amount": "250000.000000000000000000"}
                ]
            }],
            "total": [{"denom": "ubtsg", "amount": "250000.000000000000000000"}]
        }"#;
        let response: RewardsResponse = serde_json::from_str(raw).unwrap();
        let record = RewardRecord::stamped("bitsong1d", response.rewards[0].clone());
        assert_eq!(record.delegator_address, "bitsong1d");
        assert_eq!(record.amount_in("ubtsg"), Some(&Amount::from_units(250_000)));
        assert_eq!(record.amount_in("uatom"), None);
    }

    #[test]
    fn rejects_negative_balance() {
        let raw = r#"{
            "delegation_responses": [{
                "delegation": {"delegator_address": "d", "validator_address": "v", "shares": "1"},
                "balance": {"denom": "ubtsg", "amount": "-1"}
            }]
        }"#;
        assert!(serde_json::from_str::<DelegationsResponse>(raw).is_err());
    }
}
