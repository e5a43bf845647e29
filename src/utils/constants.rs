//! Constants shared across the application.

/// Default configuration directory, holding `watcher.json` and `networks/`
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// File name of the watcher configuration inside the configuration directory
pub const WATCHER_CONFIG_FILE: &str = "watcher.json";

/// Directory name of the network configurations inside the configuration directory
pub const NETWORKS_CONFIG_DIR: &str = "networks";

/// Delay before a balance increase is delivered, in milliseconds
pub const DEFAULT_BALANCE_INCREASE_DELAY_MS: u64 = 2_500;

/// Delay before a balance decrease is delivered, in milliseconds
///
/// Longer than the increase delay so a receiving account's notification lands
/// before the sending account's one. Matrixbot orders alerts incorrectly otherwise.
pub const DEFAULT_BALANCE_DECREASE_DELAY_MS: u64 = 5_000;

/// Default metrics server address
pub const DEFAULT_METRICS_ADDRESS: &str = "127.0.0.1:8081";
