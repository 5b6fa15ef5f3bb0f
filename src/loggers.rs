#[cfg(feature = "defmt_logger")]
mod defmt_logger;
#[cfg(feature = "defmt_logger")]
pub use defmt_logger::init;

#[cfg(feature = "null_logger")]
mod null_logger;
#[cfg(feature = "null_logger")]
pub use null_logger::init;

#[cfg(feature = "serial_logger")]
mod serial_logger;
#[cfg(feature = "serial_logger")]
pub use serial_logger::init;

#[cfg(any(
    all(feature = "defmt_logger", feature = "null_logger"),
    all(feature = "defmt_logger", feature = "serial_logger"),
    all(feature = "null_logger", feature = "serial_logger"),
    not(any(
        feature = "defmt_logger",
        feature = "null_logger",
        feature = "serial_logger"
    )),
))]
compile_error!("enable exactly one of `defmt_logger`, `serial_logger` or `null_logger`");

pub use log::Level;
