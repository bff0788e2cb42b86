//! log4rs setup for test binaries.

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;
use std::sync::Once;

/// Config file read from the working directory when present.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

static INIT: Once = Once::new();

/// Initialise logging once per process. Safe to call from every test.
pub fn init() {
    INIT.call_once(|| {
        if Path::new(LOG_CONFIG_FILE).exists() {
            if let Err(e) = log4rs::init_file(LOG_CONFIG_FILE, Default::default()) {
                eprintln!("Error initializing log4rs from {LOG_CONFIG_FILE}: {e}");
            }
            return;
        }
        if let Err(e) = init_console(LevelFilter::Info) {
            eprintln!("Error initializing log4rs: {e}");
        }
    });
}

fn init_console(level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%H:%M:%S%.3f)} {h({l:5})} {t} - {m}{n}",
        )))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        init();
        init();
        log::info!("logging initialised");
    }
}
