pub mod aggregator;
pub mod lcd_client;
