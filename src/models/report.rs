use super::Amount;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelegatorSummary {
    pub address: String,
    pub amount: Amount,
    pub rewards: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatorSummary {
    pub address: String,
    pub name: String,
    pub status: String,
    pub total_amount: Amount,
    pub total_rewards: Amount,
    pub delegators: Vec<DelegatorSummary>,
}

impl ValidatorSummary {
    pub fn has_stake_or_rewards(&self) -> bool {
        !self.total_amount.is_zero() || !self.total_rewards.is_zero()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total_amount: Amount,
    pub total_rewards: Amount,
    pub delegations: Vec<ValidatorSummary>,
}
