//! Per-channel sink state
//!
//! A marquee channel either holds its sink or has permanently lost it.
//! Holding a sink is split into healthy and faulted so that a failed write
//! is visible without giving the sink up.

use core::mem;

/// Sink handle owned by one marquee channel
#[derive(Debug)]
pub enum SinkState<S> {
    /// No sink: it never initialized or has been released
    Disabled,
    /// Sink present, last write succeeded
    Ready(S),
    /// Sink present, last write failed
    Faulted(S),
}

impl<S> Default for SinkState<S> {
    fn default() -> Self {
        Self::Disabled
    }
}

impl<S> SinkState<S> {
    /// Whether the channel still holds a sink
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    pub const fn is_faulted(&self) -> bool {
        matches!(self, Self::Faulted(_))
    }

    /// Borrow the sink if present
    pub fn sink_mut(&mut self) -> Option<&mut S> {
        match self {
            Self::Ready(sink) | Self::Faulted(sink) => Some(sink),
            Self::Disabled => None,
        }
    }

    /// Record the outcome of the last write
    pub fn mark(&mut self, healthy: bool) {
        *self = match mem::replace(self, Self::Disabled) {
            Self::Ready(sink) | Self::Faulted(sink) if healthy => Self::Ready(sink),
            Self::Ready(sink) | Self::Faulted(sink) => Self::Faulted(sink),
            Self::Disabled => Self::Disabled,
        };
    }

    /// Take the sink out, leaving the channel disabled for good
    pub fn release(&mut self) -> Option<S> {
        match mem::replace(self, Self::Disabled) {
            Self::Ready(sink) | Self::Faulted(sink) => Some(sink),
            Self::Disabled => None,
        }
    }
}
