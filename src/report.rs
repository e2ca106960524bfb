//! Failure reports returned by the marquee session
//!
//! Sink failures never abort the session. Each lifecycle call returns plain
//! data describing what went wrong, and the host decides what to do with it.

use core::fmt;

use heapless::Vec;

/// Sink operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkStage {
    /// Opening the sink (factory call)
    Open,
    /// Turning the display on or off
    Enable,
    /// Setting the strip brightness
    Brightness,
    /// Writing a window
    Write,
    /// Blanking the display
    Clear,
    /// Releasing the sink
    Close,
}

impl SinkStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Enable => "enable",
            Self::Brightness => "brightness",
            Self::Write => "write",
            Self::Clear => "clear",
            Self::Close => "close",
        }
    }
}

impl fmt::Display for SinkStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed sink operation together with the sink's error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkFailure<E> {
    pub stage: SinkStage,
    pub error: E,
}

impl<E> SinkFailure<E> {
    pub const fn new(stage: SinkStage, error: E) -> Self {
        Self { stage, error }
    }
}

/// Outcome of one channel in a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStatus<E> {
    /// Channel has no sink
    Disabled,
    /// Window written
    Written,
    /// Write failed; the sink is kept and retried on the next tick
    Failed(SinkFailure<E>),
}

impl<E> ChannelStatus<E> {
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    pub const fn is_written(&self) -> bool {
        matches!(self, Self::Written)
    }
}

/// Initialization outcome of both channels
#[derive(Debug)]
pub struct StartReport<TE, PE> {
    pub text: Result<(), SinkFailure<TE>>,
    pub pixels: Result<(), SinkFailure<PE>>,
}

impl<TE, PE> StartReport<TE, PE> {
    /// At least one channel came up
    pub const fn any_active(&self) -> bool {
        self.text.is_ok() || self.pixels.is_ok()
    }
}

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport<TE, PE> {
    pub text: ChannelStatus<TE>,
    pub pixels: ChannelStatus<PE>,
}

impl<TE, PE> TickReport<TE, PE> {
    pub(crate) const fn exhausted() -> Self {
        Self {
            text: ChannelStatus::Disabled,
            pixels: ChannelStatus::Disabled,
        }
    }

    /// Both channels are gone; the scheduler should stop ticking
    pub const fn is_exhausted(&self) -> bool {
        self.text.is_disabled() && self.pixels.is_disabled()
    }
}

/// Maximum failures a single channel teardown can produce
pub const MAX_TEARDOWN_FAILURES: usize = 3;

/// Release outcome of one channel
#[derive(Debug)]
pub struct Teardown<E> {
    /// A sink was held and has now been dropped
    pub released: bool,
    /// Steps that failed, in execution order
    pub failures: Vec<SinkFailure<E>, MAX_TEARDOWN_FAILURES>,
}

impl<E> Teardown<E> {
    /// Nothing to release
    pub const fn idle() -> Self {
        Self {
            released: false,
            failures: Vec::new(),
        }
    }

    pub(crate) const fn released() -> Self {
        Self {
            released: true,
            failures: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, stage: SinkStage, result: Result<(), E>) {
        if let Err(error) = result {
            // Capacity matches the number of teardown steps
            let _ = self.failures.push(SinkFailure::new(stage, error));
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl<E> Default for Teardown<E> {
    fn default() -> Self {
        Self::idle()
    }
}

/// Release outcome of both channels
#[derive(Debug)]
pub struct StopReport<TE, PE> {
    pub text: Teardown<TE>,
    pub pixels: Teardown<PE>,
}

impl<TE, PE> StopReport<TE, PE> {
    /// Whether this call released any sink
    pub const fn released_any(&self) -> bool {
        self.text.released || self.pixels.released
    }

    pub fn is_clean(&self) -> bool {
        self.text.is_clean() && self.pixels.is_clean()
    }
}

impl<TE, PE> Default for StopReport<TE, PE> {
    fn default() -> Self {
        Self {
            text: Teardown::idle(),
            pixels: Teardown::idle(),
        }
    }
}
