//! Marquee session - drives both channels from a single tick
//!
//! The session owns one [`ScrollBuffer`] per channel and the sinks handed out
//! by the factories in [`MarqueeSession::start`]. Every tick pulls a window
//! from each buffer and writes it to the matching sink. Sink failures are
//! reported, never raised: a channel that fails to initialize stays disabled,
//! a channel that fails a write is retried on the next tick.

use heapless::String;
use log::{debug, error, warn};

use crate::channel::SinkState;
use crate::color::{BLACK, Rgb};
use crate::config::{MarqueeConfig, StripDirection};
use crate::report::{
    ChannelStatus, SinkFailure, SinkStage, StartReport, StopReport, Teardown, TickReport,
};
use crate::scheduler::{PeriodicTask, ScheduleHandle, TaskControl};
use crate::scroll::ScrollBuffer;
use crate::{PixelSink, TextSink};

/// Glyphs shown at once on the alphanumeric display
pub const TEXT_WINDOW: usize = 6;

/// Pixels on the LED strip
pub const COLOR_WINDOW: usize = 7;

/// Glyph shown where there is no text
pub const EMPTY_GLYPH: char = ' ';

const MAX_GLYPH_BYTES: usize = 4;
const MAX_TEXT_BYTES: usize = 32;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Sinks are being opened
    Starting,
    /// At least one channel is running
    Active,
    /// Sinks are being released
    Stopping,
    /// No sink is held; ticks are no-ops
    Stopped,
}

/// Marquee session
///
/// `TEXT_CAP` and `COLOR_CAP` bound the padded length of each channel,
/// `TEXT_WIDTH` and `COLOR_WIDTH` are the window widths.
pub struct MarqueeSession<
    TS: TextSink,
    PS: PixelSink,
    const TEXT_CAP: usize,
    const COLOR_CAP: usize,
    const TEXT_WIDTH: usize = { TEXT_WINDOW },
    const COLOR_WIDTH: usize = { COLOR_WINDOW },
> {
    text: SinkState<TS>,
    pixels: SinkState<PS>,
    glyphs: ScrollBuffer<char, TEXT_CAP>,
    colors: ScrollBuffer<Rgb, COLOR_CAP>,
    direction: StripDirection,
    phase: SessionPhase,
}

impl<
    TS: TextSink,
    PS: PixelSink,
    const TEXT_CAP: usize,
    const COLOR_CAP: usize,
    const TEXT_WIDTH: usize,
    const COLOR_WIDTH: usize,
> MarqueeSession<TS, PS, TEXT_CAP, COLOR_CAP, TEXT_WIDTH, COLOR_WIDTH>
{
    /// Open both sinks and build the scroll buffers.
    ///
    /// Each factory is called once. A sink that fails to open or initialize
    /// leaves its channel disabled for the lifetime of the session; the
    /// other channel is unaffected.
    ///
    /// # Panics
    ///
    /// Panics if the padded text or palette does not fit `TEXT_CAP` or
    /// `COLOR_CAP`.
    pub fn start<OT, OP>(
        open_text: OT,
        open_pixels: OP,
        config: &MarqueeConfig<'_>,
    ) -> (Self, StartReport<TS::Error, PS::Error>)
    where
        OT: FnOnce() -> Result<TS, TS::Error>,
        OP: FnOnce() -> Result<PS, PS::Error>,
    {
        const {
            assert!(TEXT_WIDTH * MAX_GLYPH_BYTES <= MAX_TEXT_BYTES, "text window too wide");
        };

        let glyphs = match ScrollBuffer::try_from_iter(
            config.text.chars(),
            EMPTY_GLYPH,
            config.text_prefix,
        ) {
            Ok(buffer) => buffer,
            Err(err) => panic!("marquee text: {}", err),
        };
        let colors = match ScrollBuffer::try_from_iter(
            config.palette.iter().copied(),
            BLACK,
            config.color_prefix,
        ) {
            Ok(buffer) => buffer,
            Err(err) => panic!("marquee palette: {}", err),
        };

        let mut session = Self {
            text: SinkState::Disabled,
            pixels: SinkState::Disabled,
            glyphs,
            colors,
            direction: config.direction,
            phase: SessionPhase::Starting,
        };

        let text = open_text()
            .map_err(|error| SinkFailure::new(SinkStage::Open, error))
            .and_then(init_text);
        let text = adopt(&mut session.text, "text", text);

        let pixels = open_pixels()
            .map_err(|error| SinkFailure::new(SinkStage::Open, error))
            .and_then(|sink| init_pixels::<PS, COLOR_WIDTH>(sink, config.brightness));
        let pixels = adopt(&mut session.pixels, "pixel", pixels);

        session.phase = if session.text.is_active() || session.pixels.is_active() {
            SessionPhase::Active
        } else {
            warn!("no marquee sink available");
            SessionPhase::Stopped
        };

        (session, StartReport { text, pixels })
    }

    /// Advance both channels by one window.
    ///
    /// The report is exhausted once neither channel holds a sink.
    pub fn tick(&mut self) -> TickReport<TS::Error, PS::Error> {
        if self.phase != SessionPhase::Active {
            return TickReport::exhausted();
        }

        TickReport {
            text: self.tick_text(),
            pixels: self.tick_pixels(),
        }
    }

    fn tick_text(&mut self) -> ChannelStatus<TS::Error> {
        let Some(sink) = self.text.sink_mut() else {
            return ChannelStatus::Disabled;
        };

        let window: [char; TEXT_WIDTH] = self.glyphs.next();
        let text = join_glyphs(&window);
        let status = match sink.write(&text) {
            Ok(()) => ChannelStatus::Written,
            Err(error) => {
                warn!("unable to set display: {:?}", error);
                ChannelStatus::Failed(SinkFailure::new(SinkStage::Write, error))
            }
        };

        self.text.mark(status.is_written());
        status
    }

    fn tick_pixels(&mut self) -> ChannelStatus<PS::Error> {
        let Some(sink) = self.pixels.sink_mut() else {
            return ChannelStatus::Disabled;
        };

        let mut frame: [Rgb; COLOR_WIDTH] = self.colors.next();
        if self.direction == StripDirection::Reversed {
            frame.reverse();
        }
        let status = match write_frame(sink, &frame) {
            Ok(()) => ChannelStatus::Written,
            Err(error) => {
                warn!("unable to set LED strip: {:?}", error);
                ChannelStatus::Failed(SinkFailure::new(SinkStage::Write, error))
            }
        };

        self.pixels.mark(status.is_written());
        status
    }

    /// Blank and release both sinks.
    ///
    /// Every release step runs even if an earlier one fails, and the sink is
    /// dropped either way. Calling `stop` again does nothing.
    pub fn stop(&mut self) -> StopReport<TS::Error, PS::Error> {
        if self.phase == SessionPhase::Stopped && !self.holds_sinks() {
            return StopReport::default();
        }
        self.phase = SessionPhase::Stopping;

        let text = self.text.release().map_or_else(Teardown::idle, teardown_text);
        let pixels = self
            .pixels
            .release()
            .map_or_else(Teardown::idle, teardown_pixels::<PS, COLOR_WIDTH>);

        self.phase = SessionPhase::Stopped;
        debug!("marquee stopped");

        StopReport { text, pixels }
    }

    /// Cancel the schedule driving this session, then [`stop`](Self::stop).
    pub fn stop_scheduled(
        &mut self,
        schedule: &ScheduleHandle<'_>,
    ) -> StopReport<TS::Error, PS::Error> {
        schedule.cancel();
        self.stop()
    }

    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn text_state(&self) -> &SinkState<TS> {
        &self.text
    }

    pub fn pixel_state(&self) -> &SinkState<PS> {
        &self.pixels
    }

    pub fn text_buffer(&self) -> &ScrollBuffer<char, TEXT_CAP> {
        &self.glyphs
    }

    pub fn color_buffer(&self) -> &ScrollBuffer<Rgb, COLOR_CAP> {
        &self.colors
    }

    fn holds_sinks(&self) -> bool {
        self.text.is_active() || self.pixels.is_active()
    }
}

impl<
    TS: TextSink,
    PS: PixelSink,
    const TEXT_CAP: usize,
    const COLOR_CAP: usize,
    const TEXT_WIDTH: usize,
    const COLOR_WIDTH: usize,
> PeriodicTask for MarqueeSession<TS, PS, TEXT_CAP, COLOR_CAP, TEXT_WIDTH, COLOR_WIDTH>
{
    fn run(&mut self) -> TaskControl {
        if self.tick().is_exhausted() {
            debug!("marquee exhausted, cancelling");
            return TaskControl::Stop;
        }
        TaskControl::Continue
    }
}

impl<
    TS: TextSink,
    PS: PixelSink,
    const TEXT_CAP: usize,
    const COLOR_CAP: usize,
    const TEXT_WIDTH: usize,
    const COLOR_WIDTH: usize,
> Drop for MarqueeSession<TS, PS, TEXT_CAP, COLOR_CAP, TEXT_WIDTH, COLOR_WIDTH>
{
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Store an initialized sink, or log why the channel stays disabled
fn adopt<S, E: core::fmt::Debug>(
    slot: &mut SinkState<S>,
    channel: &str,
    result: Result<S, SinkFailure<E>>,
) -> Result<(), SinkFailure<E>> {
    match result {
        Ok(sink) => {
            debug!("{} sink initialized", channel);
            *slot = SinkState::Ready(sink);
            Ok(())
        }
        Err(failure) => {
            warn!(
                "{} sink disabled, {} failed: {:?}",
                channel, failure.stage, failure.error
            );
            Err(failure)
        }
    }
}

fn init_text<S: TextSink>(mut sink: S) -> Result<S, SinkFailure<S::Error>> {
    match sink.enable(true) {
        Ok(()) => Ok(sink),
        Err(error) => {
            abandon("text", sink.close());
            Err(SinkFailure::new(SinkStage::Enable, error))
        }
    }
}

fn init_pixels<S: PixelSink, const W: usize>(
    mut sink: S,
    brightness: u8,
) -> Result<S, SinkFailure<S::Error>> {
    let result = sink
        .set_brightness(brightness)
        .map_err(|error| SinkFailure::new(SinkStage::Brightness, error))
        .and_then(|()| {
            write_frame(&mut sink, &[BLACK; W])
                .map_err(|error| SinkFailure::new(SinkStage::Write, error))
        });

    match result {
        Ok(()) => Ok(sink),
        Err(failure) => {
            abandon("pixel", sink.close());
            Err(failure)
        }
    }
}

/// Close result of a sink dropped during initialization
fn abandon<E: core::fmt::Debug>(channel: &str, closed: Result<(), E>) {
    if let Err(error) = closed {
        warn!("{} sink close after failed init: {:?}", channel, error);
    }
}

fn teardown_text<S: TextSink>(mut sink: S) -> Teardown<S::Error> {
    let mut teardown = Teardown::released();
    teardown.record(SinkStage::Clear, sink.clear());
    teardown.record(SinkStage::Enable, sink.enable(false));
    teardown.record(SinkStage::Close, sink.close());

    for failure in &teardown.failures {
        error!("error closing display, {} failed: {:?}", failure.stage, failure.error);
    }
    teardown
}

fn teardown_pixels<S: PixelSink, const W: usize>(mut sink: S) -> Teardown<S::Error> {
    let mut teardown = Teardown::released();
    teardown.record(SinkStage::Write, write_frame(&mut sink, &[BLACK; W]));
    teardown.record(SinkStage::Brightness, sink.set_brightness(0));
    teardown.record(SinkStage::Close, sink.close());

    for failure in &teardown.failures {
        error!("error closing LED strip, {} failed: {:?}", failure.stage, failure.error);
    }
    teardown
}

/// Write one frame to the strip.
///
/// APA102 strips drop the first frame after some bus conditions, so every
/// frame is sent twice.
fn write_frame<S: PixelSink>(sink: &mut S, frame: &[Rgb]) -> Result<(), S::Error> {
    sink.write(frame)?;
    sink.write(frame)
}

fn join_glyphs(glyphs: &[char]) -> String<MAX_TEXT_BYTES> {
    let mut text = String::new();
    for &glyph in glyphs {
        // Fits: the window width is checked against the buffer in `start`
        let _ = text.push(glyph);
    }
    text
}
