//! Periodic read-decode-render-write cycle
//!
//! Each tick reopens the receiver, reads until one GPRMC fix decodes, draws
//! the speed, and pushes the frame to the display. Failures are logged and
//! the next tick tries again; nothing here ends the process.

use crate::conversion::{format_speed, SpeedUnit};
use crate::display::{render_reading, DisplayDevice, DisplayFramer};
use crate::error::Result;
use crate::parser::{Clock, SentenceDecoder, SentenceStream, SystemClock};
use crate::serial::SerialSource;
use crate::types::{Fix, RenderedFrame};
use log::{info, warn};
use std::thread;
use std::time::Duration;

/// Result of one cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// A fix was decoded and its speed shown
    Displayed(Fix),
    /// The receiver stream ended before any GPRMC record decoded
    NoFix,
}

/// Paces the polling loop
pub trait Ticker {
    /// Wait for the next cycle; `false` stops the loop
    fn wait(&mut self) -> bool;
}

/// Sleeps a fixed interval and never stops
#[derive(Debug, Clone, Copy)]
pub struct IntervalTicker {
    interval: Duration,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for IntervalTicker {
    fn wait(&mut self) -> bool {
        thread::sleep(self.interval);
        true
    }
}

/// What to show for each fix
#[derive(Debug, Clone)]
pub struct Presentation {
    pub label: String,
    pub unit: SpeedUnit,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            label: "Speed".to_string(),
            unit: SpeedUnit::Knots,
        }
    }
}

impl Presentation {
    pub fn render(&self, fix: &Fix) -> Result<RenderedFrame> {
        let value = format_speed(self.unit.convert(fix.speed_knots));
        render_reading(&self.label, &value)
    }
}

pub struct Poller<S, D, C = SystemClock>
where
    S: SerialSource,
    D: DisplayDevice,
    C: Clock,
{
    source: S,
    device: D,
    decoder: SentenceDecoder<C>,
    presentation: Presentation,
    framer: DisplayFramer,
}

impl<S, D, C> Poller<S, D, C>
where
    S: SerialSource,
    D: DisplayDevice,
    C: Clock,
{
    pub fn new(source: S, device: D, decoder: SentenceDecoder<C>, presentation: Presentation) -> Self {
        Self {
            source,
            device,
            decoder,
            presentation,
            framer: DisplayFramer::new(),
        }
    }

    /// Read the receiver until a fix decodes, without touching the display
    pub fn read_fix(&mut self) -> Result<Option<Fix>> {
        let reader = self.source.open()?;
        SentenceStream::new(reader).next_fix(&self.decoder)
    }

    /// One full read-decode-render-write cycle
    pub fn run_cycle(&mut self) -> Result<CycleOutcome> {
        let fix = match self.read_fix()? {
            Some(fix) => fix,
            None => return Ok(CycleOutcome::NoFix),
        };

        let frame = self.presentation.render(&fix)?;
        self.framer.write(&frame, &mut self.device)?;
        info!(
            "Displayed {} {} (status {:?})",
            format_speed(self.presentation.unit.convert(fix.speed_knots)),
            self.presentation.unit,
            fix.status
        );

        Ok(CycleOutcome::Displayed(fix))
    }

    /// Run cycles until `ticker` says stop, returning how many ran
    pub fn run<T: Ticker>(&mut self, ticker: &mut T) -> usize {
        self.run_with(ticker, |_| {})
    }

    /// Like [`Poller::run`], handing every displayed fix to `on_fix`
    pub fn run_with<T, F>(&mut self, ticker: &mut T, mut on_fix: F) -> usize
    where
        T: Ticker,
        F: FnMut(&Fix),
    {
        let mut cycles = 0;
        loop {
            cycles += 1;
            match self.run_cycle() {
                Ok(CycleOutcome::Displayed(fix)) => on_fix(&fix),
                Ok(CycleOutcome::NoFix) => warn!("No GPRMC fix before the receiver stream ended"),
                Err(err) => warn!("Update failed: {}", err),
            }
            if !ticker.wait() {
                return cycles;
            }
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}
