use std::error::Error;
use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode, WriteLogger};

fn level_for(verbose: u8) -> Option<LevelFilter> {
    match verbose {
        0 => None,
        1 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

/// `RUST_LOG` drives `env_logger` unless `-v` raises the level. With a log file, terminal
/// output stays at info and the file gets everything up to the requested level.
pub fn init(verbose: u8, log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match log_file {
        Some(path) => {
            let file_level = level_for(verbose).unwrap_or(LevelFilter::Debug);
            CombinedLogger::init(vec![
                TermLogger::new(
                    LevelFilter::Info,
                    Config::default(),
                    TerminalMode::Stderr,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(file_level, Config::default(), File::create(path)?),
            ])?;
        }
        None => {
            let mut builder =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
            if let Some(level) = level_for(verbose) {
                builder.filter_level(level);
            }
            builder.try_init()?;
        }
    }
    Ok(())
}
