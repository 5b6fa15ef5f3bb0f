use log::{Level, Metadata, Record};
use panic_halt as _;

use lift_hardware::serial::DebugSerialPort;

struct LoggerType;

static NULL_LOGGER: LoggerType = LoggerType;

pub fn init(_port: DebugSerialPort, level: Level) {
    log::set_logger(&NULL_LOGGER).unwrap();
    log::set_max_level(level.to_level_filter());
}

impl log::Log for LoggerType {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, _record: &Record) {}

    fn flush(&self) {}
}
