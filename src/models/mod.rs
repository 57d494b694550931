mod amount;
pub mod lcd;
mod report;

pub use amount::Amount;
pub use lcd::{
    DelegationResponse, DelegationsResponse, Pagination, RewardRecord, RewardsResponse, Validator,
    ValidatorsResponse,
};
pub use report::{DelegatorSummary, Report, ValidatorSummary};
