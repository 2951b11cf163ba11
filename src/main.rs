use anyhow::{Context, Result};
use gofont::app::App;
use gofont::cli;
use gofont_config::Config;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let runtime_options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config (applied below).
    gofont::debug::init_log_bridge(runtime_options.log_level);

    log::info!("Starting gofont {}", gofont::VERSION);

    let config = match &runtime_options.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    gofont::debug::set_level(config.log_level.to_level_filter());

    let result = App::new(config, runtime_options).and_then(App::run);

    if let Err(ref e) = result {
        log::error!("gofont failed: {e:#}");
        eprintln!("gofont: error: {e:#}");
        std::process::exit(1);
    }
    log::info!("gofont finished");
    Ok(())
}
