pub mod daily_series;
pub mod octopus_rates;
pub mod telegram;
