//! Log output
//!
//! The crate logs through the `log` facade. With the `esp32-log` feature,
//! [`init_logger`] installs the `esp-println` backend.

pub use log::LevelFilter;

/// Install the serial logger
#[cfg(feature = "esp32-log")]
pub fn init_logger(level: LevelFilter) {
    esp_println::logger::init_logger(level);
}

/// No backend without the `esp32-log` feature; only sets the level
#[cfg(not(feature = "esp32-log"))]
pub fn init_logger(level: LevelFilter) {
    log::set_max_level(level);
}
