use oncomap_config::Config;

/// Initialize the logging system.
pub fn init_logging(config: &Config) {
    oncomap_log::init(config.logging());
}

/// Print spawn infos to the log.
pub fn dump_spawn_infos(config: &Config) {
    if config.path().as_os_str().is_empty() {
        oncomap_log::debug!("running without config folder");
    } else {
        oncomap_log::debug!("running from config folder {}", config.path().display());
    }

    oncomap_log::debug!("  log level: {}", config.logging().level);
    oncomap_log::debug!("  region preset: {:?}", config.regions().preset);
    oncomap_log::debug!("  table format: {:?}", config.dataset().format);
}
