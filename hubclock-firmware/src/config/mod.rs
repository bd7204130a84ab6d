//! Panel configuration
//!
//! `panel.toml` is embedded at build time (and checked by build.rs). It is
//! parsed once at boot; a file that still fails to parse falls back to
//! the built-in defaults.

use defmt::*;

use hubclock_core::{parse_config, PanelConfig};

/// Embedded configuration, edit panel.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../panel.toml");

/// Parse the embedded configuration
pub fn load() -> PanelConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded panel configuration");
            log_config_summary(&config);
            config
        }
        Err(e) => {
            error!("Failed to parse panel.toml: {:?}", e);
            warn!("Using default panel configuration");
            PanelConfig::default()
        }
    }
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &PanelConfig) {
    debug!("  scan mode: {:?}", config.scan);
    debug!("  tick: {} Hz, every {} ticks", config.tick_hz, config.refresh_interval_ticks);
    debug!("  demo color: {:?}, 24h: {}", config.color, config.clock_24h);
}
