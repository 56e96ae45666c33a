use crate::app::config::LoggingConfig;
use flexi_logger::{
    Cleanup, Criterion, DeferredNow, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
};
use std::path::{Path, PathBuf};

/// Start the file logger. Keep the returned handle alive for the whole session.
pub fn init_logger(config: &LoggingConfig) -> Result<LoggerHandle, FlexiLoggerError> {
    let level = if cfg!(debug_assertions) {
        "debug".to_string()
    } else {
        config.level.to_lowercase()
    };

    let mut logger = Logger::try_with_str(&level)?
        .log_to_file(
            FileSpec::default()
                .directory(log_directory(config))
                .basename("swipedeck")
                .suppress_timestamp(),
        )
        .format_for_files(custom_log_format)
        .use_utc();

    if config.append {
        logger = logger.append();
    }

    if config.keep_files > 0 {
        logger = logger.rotate(
            Criterion::Size(config.rotation_size_mb * 1024 * 1024),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(config.keep_files),
        );
    }

    let handle = logger.start()?;
    log::info!("Logger initialized with level: {}", level);
    Ok(handle)
}

/// Log directory: the configured override, else a platform data directory
pub fn log_directory(config: &LoggingConfig) -> PathBuf {
    if let Some(dir) = &config.directory {
        return dir.clone();
    }

    #[cfg(target_os = "macos")]
    return dirs::home_dir()
        .map(|h| h.join("Library/Logs/swipedeck"))
        .unwrap_or_else(|| PathBuf::from("./logs"));

    #[cfg(not(target_os = "macos"))]
    return dirs::data_local_dir()
        .map(|d| d.join("swipedeck").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"));
}

pub fn log_file_path(config: &LoggingConfig) -> PathBuf {
    log_directory(config).join("swipedeck.log")
}

/// Ensure log directory exists
pub fn ensure_log_directory(config: &LoggingConfig) -> color_eyre::Result<()> {
    std::fs::create_dir_all(log_directory(config))?;
    Ok(())
}

fn custom_log_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} [{}] [{}:{}] {}",
        now.now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        record.args()
    )
}

pub fn log_startup_info(config: &LoggingConfig) {
    log::info!("=== swipedeck starting ===");
    log::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    log::info!("OS: {} ({})", std::env::consts::OS, std::env::consts::ARCH);
    log::info!("Log file: {}", log_file_path(config).display());
}

pub fn log_shutdown_info() {
    log::info!("=== swipedeck shutting down ===");
}

pub fn log_config_loading(config_path: &Path, created: bool) {
    if created {
        log::info!("Created default config file at: {}", config_path.display());
    } else {
        log::info!("Loaded config file from: {}", config_path.display());
    }
}

/// Log a key-driven command for debugging
pub fn log_user_interaction(action: &str, context: Option<&str>) {
    match context {
        Some(ctx) => log::debug!("User action: {} - {}", action, ctx),
        None => log::debug!("User action: {}", action),
    }
}
