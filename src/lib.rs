#![no_std]

pub mod channel;
pub mod color;
pub mod config;
pub mod logging;
pub mod report;
pub mod scheduler;
pub mod scroll;
pub mod session;

use core::fmt::Debug;

pub use channel::SinkState;
pub use config::{MarqueeConfig, StripDirection, TickTimings};
pub use report::{
    ChannelStatus, SinkFailure, SinkStage, StartReport, StopReport, Teardown, TickReport,
};
pub use scheduler::{
    CancelFlag, FixedRateScheduler, PeriodicTask, PollResult, ScheduleHandle, TaskControl,
};
pub use scroll::{CapacityError, ScrollBuffer};
pub use session::{COLOR_WINDOW, MarqueeSession, SessionPhase, TEXT_WINDOW};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract alphanumeric display
///
/// Implement this trait for the segment display driver.
/// The session takes ownership of the display and releases it with `close`.
pub trait TextSink: Sized {
    type Error: Debug;

    /// Turn the display on or off
    fn enable(&mut self, enabled: bool) -> Result<(), Self::Error>;

    /// Show text on the display
    fn write(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Blank the display
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Release the display
    fn close(self) -> Result<(), Self::Error>;
}

/// Abstract LED strip driver
///
/// Implement this trait for the strip driver.
/// The session takes ownership of the strip and releases it with `close`.
pub trait PixelSink: Sized {
    type Error: Debug;

    /// Set the global strip brightness
    fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error>;

    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error>;

    /// Release the strip
    fn close(self) -> Result<(), Self::Error>;
}
