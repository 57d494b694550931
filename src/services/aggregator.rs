use crate::models::{
    Amount, DelegationResponse, DelegatorSummary, Report, RewardRecord, Validator,
    ValidatorSummary,
};
use crate::services::lcd_client::{FetchError, StakingSource};
use futures::future::try_join_all;
use log::info;

pub struct StakingAggregator<S> {
    source: S,
    tracked_addresses: Vec<String>,
    staking_denom: String,
}

impl<S: StakingSource> StakingAggregator<S> {
    pub fn new(source: S, tracked_addresses: Vec<String>, staking_denom: String) -> Self {
        Self {
            source,
            tracked_addresses,
            staking_denom,
        }
    }

    /// Fetches validators, delegations and rewards concurrently and reduces
    /// them into a report. The first failed request fails the whole call.
    pub async fn aggregate(&self) -> Result<Report, FetchError> {
        info!(
            "Aggregating stakes of {} tracked addresses",
            self.tracked_addresses.len()
        );

        let delegations = try_join_all(
            self.tracked_addresses
                .iter()
                .map(|address| self.source.fetch_delegations(address)),
        );
        let rewards = try_join_all(
            self.tracked_addresses
                .iter()
                .map(|address| self.source.fetch_rewards(address)),
        );
        let (validators, delegations, rewards) =
            futures::try_join!(self.source.fetch_validators(), delegations, rewards)?;

        let delegations: Vec<DelegationResponse> = delegations.into_iter().flatten().collect();
        let rewards: Vec<RewardRecord> = rewards.into_iter().flatten().collect();

        let report = reduce(&validators, &delegations, &rewards, &self.staking_denom);
        info!(
            "Report covers {} validators, {} staked, {} rewards (smallest units)",
            report.delegations.len(),
            report.total_amount,
            report.total_rewards
        );
        Ok(report)
    }
}

/// Sum of `denom` rewards over every record for the exact
/// (validator, delegator) pair. Duplicate records are all counted.
fn reward_for(
    rewards: &[RewardRecord],
    validator_address: &str,
    delegator_address: &str,
    denom: &str,
) -> Amount {
    rewards
        .iter()
        .filter(|record| {
            record.validator_address == validator_address
                && record.delegator_address == delegator_address
        })
        .filter_map(|record| record.amount_in(denom))
        .sum()
}

fn summarize_validator(
    validator: &Validator,
    delegations: &[DelegationResponse],
    rewards: &[RewardRecord],
    denom: &str,
) -> ValidatorSummary {
    let mut total_amount = Amount::zero();
    let mut total_rewards = Amount::zero();

    let delegators = delegations
        .iter()
        .filter(|d| d.delegation.validator_address == validator.operator_address)
        .map(|d| {
            let rewards = reward_for(
                rewards,
                &d.delegation.validator_address,
                &d.delegation.delegator_address,
                denom,
            );
            total_amount += &d.balance.amount;
            total_rewards += &rewards;
            DelegatorSummary {
                address: d.delegation.delegator_address.clone(),
                amount: d.balance.amount.clone(),
                rewards,
            }
        })
        .collect();

    ValidatorSummary {
        address: validator.operator_address.clone(),
        name: validator.description.moniker.clone(),
        status: validator.status.clone(),
        total_amount,
        total_rewards,
        delegators,
    }
}

/// Joins the fetched data into a report: one summary per validator in
/// source order, empty ones dropped, then a stable sort by stake descending.
pub fn reduce(
    validators: &[Validator],
    delegations: &[DelegationResponse],
    rewards: &[RewardRecord],
    denom: &str,
) -> Report {
    let mut summaries: Vec<ValidatorSummary> = validators
        .iter()
        .map(|validator| summarize_validator(validator, delegations, rewards, denom))
        .filter(ValidatorSummary::has_stake_or_rewards)
        .collect();

    summaries.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));

    Report {
        total_amount: summaries.iter().map(|s| &s.total_amount).sum(),
        total_rewards: summaries.iter().map(|s| &s.total_rewards).sum(),
        delegations: summaries,
    }
}
