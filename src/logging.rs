//! Log setup for hosts embedding the UI.

use tracing_subscriber::EnvFilter;

use crate::config::UiConfig;

const DEFAULT_FILTER: &str = "wallet_ui=info";

/// Filter directive: `RUST_LOG` wins over `WALLET_UI_LOG`, which wins over the default.
pub fn filter_directive(config: &UiConfig) -> String {
    match std::env::var("RUST_LOG") {
        Ok(value) if !value.trim().is_empty() => value,
        _ => config
            .log_filter
            .clone()
            .unwrap_or_else(|| DEFAULT_FILTER.to_string()),
    }
}

/// Install a stderr fmt subscriber. Returns `false` when one was already installed.
pub fn init(config: &UiConfig) -> bool {
    let directive = filter_directive(config);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}
