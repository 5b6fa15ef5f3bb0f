use core::fmt::Write;

use log::{Level, Metadata, Record};
use panic_halt as _;

use lift_core::PortCell;
use lift_hardware::serial::DebugSerialPort;

struct LoggerType;

static SERIAL_LOGGER: LoggerType = LoggerType;
static PORT: PortCell<DebugSerialPort> = PortCell::new();

pub fn init(port: DebugSerialPort, level: Level) {
    PORT.put(port);
    log::set_logger(&SERIAL_LOGGER).unwrap();
    log::set_max_level(level.to_level_filter());
}

impl log::Log for LoggerType {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let level = match record.metadata().level() {
                Level::Trace => "trace",
                Level::Debug => "debug",
                Level::Info => "info",
                Level::Warn => "warn",
                Level::Error => "error",
            };

            // The write busy-waits on the UART, keep it out of the critical section so encoder
            // edges are still taken. A line logged from an interrupt mid-write is dropped.
            PORT.lend(|tx| {
                // a garbled line is not worth a panic
                writeln!(tx, "{}: {}\r", level, record.args()).ok();
            });
        }
    }

    fn flush(&self) {}
}
