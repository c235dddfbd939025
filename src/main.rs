use chirp::cli::{self, Args};
use chirp::core::config;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::process::ExitCode;

/// Installs the file logger before anything else runs. The logger itself
/// accepts every level; `log::set_max_level` does the filtering so the level
/// can change once the config file has been read.
fn init_logging(path: &Path) {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    // The CLI still works if the log file can't be created
    if let Ok(log_file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }
    log::set_max_level(config::initial_log_level());
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    init_logging(&config::log_file_path());

    let config = match cli::resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Config failed: {e}");
            eprintln!("chirp: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::set_max_level(config.log_level);

    log::info!("Chirp starting up with format: {:?}", config.format);

    match cli::run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::warn!("Command failed: {e}");
            eprintln!("chirp: {e}");
            ExitCode::FAILURE
        }
    }
}
