use defmt::{debug, error, info, trace, warn, Display2Format};
use defmt_rtt as _;
use log::{Level, Metadata, Record};
use panic_probe as _;

use lift_hardware::serial::DebugSerialPort;

struct LoggerType;

static DEFMT_LOGGER: LoggerType = LoggerType;

/// Everything goes out over RTT, the debug port is left alone.
pub fn init(_port: DebugSerialPort, level: Level) {
    log::set_logger(&DEFMT_LOGGER).unwrap();
    log::set_max_level(level.to_level_filter());
}

impl log::Log for LoggerType {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let args = Display2Format(record.args());
            match record.metadata().level() {
                Level::Trace => trace!("{}", args),
                Level::Debug => debug!("{}", args),
                Level::Info => info!("{}", args),
                Level::Warn => warn!("{}", args),
                Level::Error => error!("{}", args),
            }
        }
    }

    fn flush(&self) {}
}
