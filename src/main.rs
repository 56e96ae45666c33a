use clap::Parser;
use swipedeck::app::cli::Args;
use swipedeck::app::config::Config;
use swipedeck::app::logging;
use swipedeck::app::{
    App, AppConstructor,
    main_loop::AppMainLoop,
    terminal::{init_terminal, restore_terminal},
};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Parse command line arguments
    let args = Args::parse();

    // Handle --generate-config option
    if let Some(path) = &args.generate_config {
        let config_path = if path.is_dir() || path.to_str() == Some(".") {
            path.join("config.toml")
        } else {
            path.clone()
        };
        Config::generate_default(config_path)?;
        return Ok(());
    }

    // Determine config path for logging later
    let config_path = match args.config.clone() {
        Some(path) => path,
        None => Config::default_config_path()?,
    };
    let config_existed = config_path.exists();

    let (mut config, config_warnings) = Config::load(Some(config_path.clone()))?;
    args.apply_overrides(&mut config);

    // Keep the handle alive until exit so buffered lines are flushed
    let _logger = if config.logging.enabled {
        logging::ensure_log_directory(&config.logging)?;
        let handle = logging::init_logger(&config.logging)?;
        logging::log_startup_info(&config.logging);
        logging::log_config_loading(&config_path, !config_existed);

        for warning in &config_warnings {
            log::warn!("{}", warning);
        }
        Some(handle)
    } else {
        None
    };

    let logging_enabled = config.logging.enabled;

    // Build the app before touching the terminal so setup errors print normally
    let app = App::new(config, config_warnings)?;

    let terminal = init_terminal()?;

    let result = app.run(terminal).await;

    if logging_enabled {
        logging::log_shutdown_info();
    }

    restore_terminal()?;
    result
}
