use dotenv::dotenv;
use log::{error, info};

mod config;
mod models;
mod services;
mod utils;

use crate::config::Config;
use crate::services::aggregator::StakingAggregator;
use crate::services::lcd_client::LcdClient;
use crate::utils::helpers;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    info!("Starting delegation report");
    let config = Config::from_env()?;

    let client = LcdClient::new(&config.lcd_endpoint, config.page_limit);
    let aggregator = StakingAggregator::new(
        client,
        config.tracked_addresses.clone(),
        config.staking_denom.clone(),
    );

    let report = match aggregator.aggregate().await {
        Ok(report) => report,
        Err(e) => {
            error!("Aggregation aborted by a failed fetch of {}", e.url());
            return Err(e.into());
        }
    };

    match &config.report_output {
        Some(path) => {
            helpers::save_report(path, &report)?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", helpers::render_report(&report)?),
    }

    Ok(())
}
