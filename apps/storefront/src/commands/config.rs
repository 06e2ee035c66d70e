//! # Config Commands
//!
//! Retrieving application configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current application configuration.
///
/// ## When Used
/// - Startup (store name in the header)
/// - Currency formatting
/// - Showing the free-shipping threshold in the cart
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
