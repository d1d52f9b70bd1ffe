use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use std::io::Write;

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(
                std::io::stderr(),
                "{} {:<5} {}: {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: Logger = Logger;

/// Install the stderr logger at `info` until the configuration is read.
pub fn init_logging() -> anyhow::Result<()> {
    log::set_logger(&LOGGER).map_err(|e| anyhow::anyhow!("logger already set: {}", e))?;
    log::set_max_level(LevelFilter::Info);
    Ok(())
}

pub fn set_level(level: &str) -> anyhow::Result<()> {
    let filter: LevelFilter = level
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown log level {:?}", level))?;
    log::set_max_level(filter);
    Ok(())
}
